//! Shared numeric utilities.
//!
//! Helpers for allocation-free vector reuse and spring smoothing.

pub mod smooth_damp;
pub mod vector_pool;

pub use vector_pool::{PooledVec, VecHandle, VectorPool};
