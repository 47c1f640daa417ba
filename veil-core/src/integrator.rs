//! Numerical integrators for advancing particle buffers in time.
//!
//! The primary integrator is semi-implicit (symplectic) Euler: velocity is
//! updated from the accumulated acceleration first, then position from the
//! *new* velocity. For stiff cloth springs this is the stable cheap choice;
//! fully explicit Euler (position from the old velocity) is kept for
//! comparison and testing.
//!
//! ```text
//! symplectic:  v' = v + a*dt      explicit:  x' = x + v*dt
//!              x' = x + v'*dt                v' = v + a*dt
//! ```
//!
//! Pinned particles (inverse mass 0) are never moved.

use crate::forces::ForceModel;
use crate::types::ParticleSet;

/// Semi-implicit Euler integrator (primary).
pub struct SymplecticEuler;

impl SymplecticEuler {
    /// Clear accelerations, accumulate `forces`, and advance by `dt`.
    pub fn step<F: ForceModel>(particles: &mut ParticleSet, forces: &F, dt: f64) {
        particles.clear_accelerations();
        forces.accumulate(particles);
        Self::integrate(particles, dt);
    }

    /// Advance using whatever accelerations are already accumulated.
    ///
    /// This is the entry point the simulation driver uses after stacking
    /// several force sources (gravity + cloth springs).
    pub fn integrate(particles: &mut ParticleSet, dt: f64) {
        for i in 0..particles.capacity() {
            if particles.is_pinned(i) {
                continue;
            }
            let a = particles.acceleration(i);
            let v = particles.velocity(i) + a * dt;
            *particles.velocity_mut(i) = v;
            *particles.position_mut(i) += v * dt;
        }
    }
}

/// Fully explicit Euler integrator (for comparison/testing only).
///
/// **Warning**: gains energy on oscillating systems; do not use for cloth.
pub struct ExplicitEuler;

impl ExplicitEuler {
    pub fn step<F: ForceModel>(particles: &mut ParticleSet, forces: &F, dt: f64) {
        particles.clear_accelerations();
        forces.accumulate(particles);
        Self::integrate(particles, dt);
    }

    pub fn integrate(particles: &mut ParticleSet, dt: f64) {
        for i in 0..particles.capacity() {
            if particles.is_pinned(i) {
                continue;
            }
            let a = particles.acceleration(i);
            let v = particles.velocity(i);
            *particles.position_mut(i) += v * dt;
            *particles.velocity_mut(i) += a * dt;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
