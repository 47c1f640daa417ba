//! Rigid sphere bodies.
//!
//! A [`SphereSet`] is a particle buffer plus a per-sphere radius. The
//! renderer draws every sphere instanced from the same unit mesh, so the
//! only per-body state the physics owns is what lives here.

use crate::types::{ParticleSet, SphereMaterial, Vec4};

/// A growable collection of rigid spheres sharing one particle buffer.
///
/// Storage starts at capacity 1 and doubles whenever `add_sphere` fills it,
/// so the renderer-facing buffers reallocate O(log n) times.
#[derive(Debug, Clone)]
pub struct SphereSet {
    particles: ParticleSet,
    radii: Vec<f64>,
    count: usize,
    material: SphereMaterial,
}

impl SphereSet {
    pub fn new(material: SphereMaterial) -> Self {
        Self {
            particles: ParticleSet::with_capacity(1),
            radii: vec![0.0; 1],
            count: 0,
            material,
        }
    }

    /// Add a sphere at rest. Returns its index.
    ///
    /// Mass follows the demo convention `density * radius³` (no 4/3·π
    /// factor; density absorbs it).
    ///
    /// # Panics
    /// Panics if `radius` is not strictly positive.
    pub fn add_sphere(&mut self, position: Vec4, radius: f64) -> usize {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");

        if self.count == self.particles.capacity() {
            let doubled = self.count * 2;
            self.particles.resize(doubled);
            self.radii.resize(doubled, 0.0);
        }

        let i = self.count;
        self.radii[i] = radius;
        *self.particles.position_mut(i) = position;
        *self.particles.velocity_mut(i) = Vec4::ZERO;
        *self.particles.acceleration_mut(i) = Vec4::ZERO;
        *self.particles.rotation_mut(i) = Vec4::ZERO;
        self.particles.set_mass(i, self.material.density * radius * radius * radius);

        self.count += 1;
        i
    }

    /// Number of live spheres (not buffer capacity).
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn radius(&self, i: usize) -> f64 {
        debug_assert!(i < self.count);
        self.radii[i]
    }

    pub fn material(&self) -> &SphereMaterial {
        &self.material
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }
}

impl Default for SphereSet {
    fn default() -> Self {
        Self::new(SphereMaterial::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sphere_sets_state() {
        let mut spheres = SphereSet::default();
        let i = spheres.add_sphere(Vec4::point(1.0, 2.0, 3.0), 0.1);

        assert_eq!(i, 0);
        assert_eq!(spheres.len(), 1);
        assert_eq!(spheres.radius(0), 0.1);
        assert_eq!(spheres.particles().position(0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(spheres.particles().velocity(0), Vec4::ZERO);

        // default material drives the mass: density * r³
        assert_eq!(spheres.material().name, "Steel");
        let expected = spheres.material().density * 0.1 * 0.1 * 0.1;
        assert!((spheres.particles().mass(0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_doubles() {
        let mut spheres = SphereSet::default();
        assert_eq!(spheres.particles().capacity(), 1);

        for k in 0..5 {
            spheres.add_sphere(Vec4::point(k as f64, 0.0, 0.0), 0.5);
        }

        assert_eq!(spheres.len(), 5);
        // 1 -> 2 -> 4 -> 8
        assert_eq!(spheres.particles().capacity(), 8);

        // earlier spheres survive reallocation
        assert_eq!(spheres.particles().position(0), Vec4::point(0.0, 0.0, 0.0));
        assert_eq!(spheres.particles().position(3), Vec4::point(3.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_zero_radius_rejected() {
        let mut spheres = SphereSet::default();
        spheres.add_sphere(Vec4::point(0.0, 0.0, 0.0), 0.0);
    }
}
