//! Floating decorations that wander around an anchor on the pond surface.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::integrator::step_body;
use crate::error::PondError;
use crate::options::DriftOptions;
use crate::util::VectorPool;

/// A decoration drifting around its anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingBody {
    /// Scene object name of the decoration.
    pub name: String,
    /// Current world position.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Rest position the body is pulled back toward.
    pub anchor: Vec3,
}

/// Set of floating bodies driven by a seeded wander force.
pub struct Drift {
    bodies: Vec<FloatingBody>,
    rng: StdRng,
    options: DriftOptions,
}

impl Drift {
    /// Create an empty drift simulation. Fails if the body parameters
    /// break the mass/drag contract or the speed bounds are inverted.
    pub fn new(options: DriftOptions, seed: u64) -> Result<Self, PondError> {
        options.body.validate()?;
        options.speed.validate()?;
        Ok(Self {
            bodies: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            options,
        })
    }

    /// Add a body at rest on its anchor.
    pub fn add(&mut self, name: impl Into<String>, anchor: Vec3) {
        self.bodies.push(FloatingBody {
            name: name.into(),
            position: anchor,
            velocity: Vec3::ZERO,
            anchor,
        });
    }

    /// All bodies in insertion order.
    #[must_use]
    pub fn bodies(&self) -> &[FloatingBody] {
        &self.bodies
    }

    /// Advance every body by `dt` seconds. The per-body force vector is
    /// borrowed from `pool` and returned before the next body.
    pub fn step(
        &mut self,
        dt: f32,
        pool: &mut VectorPool,
    ) -> Result<(), PondError> {
        let Self {
            bodies,
            rng,
            options,
        } = self;
        for body in bodies.iter_mut() {
            let mut force = pool.scoped();
            force.x = rng.random_range(-1.0..=1.0);
            force.z = rng.random_range(-1.0..=1.0);
            *force *= options.wander_strength;
            *force += (body.anchor - body.position) * options.anchor_stiffness;
            step_body(
                &mut body.position,
                &mut body.velocity,
                *force,
                dt,
                &options.body,
                &options.speed,
            )?;
        }
        Ok(())
    }
}
