//! External forces acting on particle buffers.
//!
//! Forces accumulate into the acceleration slots of a [`ParticleSet`];
//! the integrator then turns accumulated accelerations into motion. Cloth
//! spring forces live with the cloth topology (`Cloth::accumulate_spring_forces`)
//! because they need the grid structure, not just particle state.

use crate::types::{constants, ParticleSet, Vec4};

/// Trait for accumulating accelerations over a particle buffer.
///
/// Implementations add into the acceleration slots; they never clear them,
/// so several models can stack within one step.
pub trait ForceModel {
    fn accumulate(&self, particles: &mut ParticleSet);
}

/// Uniform gravitational field.
pub struct Gravity {
    pub gravity: Vec4,
}

impl Gravity {
    pub fn standard() -> Self {
        Self {
            gravity: Vec4::direction(0.0, -constants::GRAVITY, 0.0),
        }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::standard()
    }
}

impl ForceModel for Gravity {
    fn accumulate(&self, particles: &mut ParticleSet) {
        for i in 0..particles.capacity() {
            // pinned particles are skipped by the integrator, not here
            *particles.acceleration_mut(i) += self.gravity;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
