use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::VectorPool;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Vector Pool", inline)]
#[serde(default)]
/// Sizing of the per-scene vector pool.
pub struct PoolOptions {
    /// Vectors allocated up front.
    pub seed: usize,
    /// Largest free-list length kept around.
    pub max_size: usize,
}

impl PoolOptions {
    /// Build a pool with these sizes.
    #[must_use]
    pub fn build(&self) -> VectorPool {
        VectorPool::new(self.seed, self.max_size)
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            seed: 16,
            max_size: 64,
        }
    }
}
