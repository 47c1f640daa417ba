//! Main simulation orchestrator.
//!
//! One `step()` advances everything by the fixed timestep:
//!
//! 1. Accumulate forces (gravity on both buffers, springs on the cloth)
//! 2. Integrate each particle buffer
//! 3. Resolve sphere-sphere contacts (rigid response)
//! 4. Resolve sphere-cloth contacts (soft response)
//!
//! Single-threaded and synchronous by design: the resolver mutates the
//! shared particle buffers in place, and the renderer reads them back
//! between steps.

use crate::cloth::Cloth;
use crate::collision::CollisionResolver;
use crate::forces::{ForceModel, Gravity};
use crate::integrator::SymplecticEuler;
use crate::spheres::SphereSet;
use crate::types::{constants, ClothMaterial, ContactProperties, SphereMaterial, Vec4};

/// Owns the bodies and advances them one fixed timestep per call.
pub struct Simulation {
    spheres: SphereSet,
    cloth: Option<Cloth>,
    gravity: Gravity,
    rigid_contact: ContactProperties,
    soft_contact: ContactProperties,
    timestep: f64,
    time: f64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_materials(
            SphereMaterial::default(),
            ContactProperties::rigid(),
            ContactProperties::soft(),
        )
    }

    /// Build a simulation around loaded material definitions.
    pub fn with_materials(
        sphere_material: SphereMaterial,
        rigid_contact: ContactProperties,
        soft_contact: ContactProperties,
    ) -> Self {
        Self {
            spheres: SphereSet::new(sphere_material),
            cloth: None,
            gravity: Gravity::standard(),
            rigid_contact,
            soft_contact,
            timestep: constants::TIMESTEP,
            time: 0.0,
        }
    }

    /// Add a rigid sphere at rest. Returns its index.
    pub fn add_sphere(&mut self, position: Vec4, radius: f64) -> usize {
        self.spheres.add_sphere(position, radius)
    }

    /// Create (or replace) the cloth grid.
    pub fn spawn_cloth(
        &mut self,
        origin: Vec4,
        size: f64,
        particles_per_edge: usize,
        material: ClothMaterial,
    ) {
        self.cloth = Some(Cloth::new_grid(origin, size, particles_per_edge, material));
    }

    pub fn spheres(&self) -> &SphereSet {
        &self.spheres
    }

    pub fn spheres_mut(&mut self) -> &mut SphereSet {
        &mut self.spheres
    }

    pub fn cloth(&self) -> Option<&Cloth> {
        self.cloth.as_ref()
    }

    pub fn cloth_mut(&mut self) -> Option<&mut Cloth> {
        self.cloth.as_mut()
    }

    /// Elapsed simulated time (s).
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Advance the whole scene by one fixed timestep.
    pub fn step(&mut self) {
        let dt = self.timestep;

        // forces + integration, spheres first
        self.spheres.particles_mut().clear_accelerations();
        self.gravity.accumulate(self.spheres.particles_mut());
        SymplecticEuler::integrate(self.spheres.particles_mut(), dt);

        if let Some(cloth) = &mut self.cloth {
            cloth.particles_mut().clear_accelerations();
            self.gravity.accumulate(cloth.particles_mut());
            cloth.accumulate_spring_forces();
            SymplecticEuler::integrate(cloth.particles_mut(), dt);
        }

        // collision response, rigid pairs then cloth
        CollisionResolver::collide_spheres(&mut self.spheres, &self.rigid_contact, dt);
        if let Some(cloth) = &mut self.cloth {
            CollisionResolver::collide_cloth(&mut self.spheres, cloth, &self.soft_contact, dt);
        }

        self.time += dt;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_fall_matches_analytic() {
        let mut sim = Simulation::new();
        sim.add_sphere(Vec4::point(0.0, 10.0, 0.0), 0.5);

        // 0.5 seconds of free fall
        for _ in 0..500 {
            sim.step();
        }

        // y = 10 - 0.5*g*t² = 10 - 0.5*9.81*0.25 ≈ 8.774
        let y = sim.spheres().particles().position(0).y;
        assert!(
            (y - 8.774).abs() < 0.02,
            "free fall should match kinematics, got y={}",
            y
        );
        assert!((sim.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_approaching_spheres_bounce_apart() {
        let mut sim = Simulation::new();
        let a = sim.add_sphere(Vec4::point(-1.0, 0.0, 0.0), 0.4);
        let b = sim.add_sphere(Vec4::point(1.0, 0.0, 0.0), 0.4);

        // no gravity: keep the collision one-dimensional
        sim.gravity.gravity = Vec4::ZERO;
        *sim.spheres_mut().particles_mut().velocity_mut(a) = Vec4::direction(2.0, 0.0, 0.0);
        *sim.spheres_mut().particles_mut().velocity_mut(b) = Vec4::direction(-2.0, 0.0, 0.0);

        for _ in 0..2000 {
            sim.step();
        }

        let va = sim.spheres().particles().velocity(a);
        let vb = sim.spheres().particles().velocity(b);
        assert!(va.x < 0.0, "first sphere should have bounced back, vx={}", va.x);
        assert!(vb.x > 0.0);

        // and they end up separated
        let gap = (sim.spheres().particles().position(b) - sim.spheres().particles().position(a))
            .magnitude();
        assert!(gap > 0.8, "spheres should separate, gap={}", gap);
    }

    #[test]
    fn test_cloth_drapes_under_gravity() {
        let mut sim = Simulation::new();
        sim.spawn_cloth(Vec4::point(0.0, 2.0, 0.0), 1.0, 6, ClothMaterial::default());
        sim.cloth_mut().unwrap().pin_top_row();

        for _ in 0..200 {
            sim.step();
        }

        let cloth = sim.cloth().unwrap();
        // pinned row stays at spawn height
        for col in 0..6 {
            let i = cloth.index(0, col);
            assert!((cloth.particles().position(i).y - 2.0).abs() < 1e-9);
        }
        // far row has fallen
        let free = cloth.index(5, 2);
        assert!(
            cloth.particles().position(free).y < 2.0 - 1e-3,
            "free cloth should sag, y={}",
            cloth.particles().position(free).y
        );
    }

    #[test]
    fn test_falling_sphere_lands_on_cloth() {
        let mut sim = Simulation::new();
        sim.spawn_cloth(Vec4::point(-0.5, 0.0, -0.5), 1.0, 8, ClothMaterial::default());
        // pin all four edges so the cloth acts like a trampoline
        if let Some(cloth) = sim.cloth_mut() {
            for k in 0..8 {
                cloth.pin(0, k);
                cloth.pin(7, k);
                cloth.pin(k, 0);
                cloth.pin(k, 7);
            }
        }

        let s = sim.add_sphere(Vec4::point(0.0, 0.3, 0.0), 0.15);

        for _ in 0..1000 {
            sim.step();
        }

        // the cloth catches the sphere well above a 1s free-fall depth
        let y = sim.spheres().particles().position(s).y;
        let free_fall_y = 0.3 - 0.5 * constants::GRAVITY;
        assert!(
            y > free_fall_y + 1.0,
            "cloth should have absorbed the fall, got y={}",
            y
        );
    }
}
