//! Impulse-based collision response.
//!
//! Every contact gets the same four-part treatment, parameterised by
//! [`ContactProperties`]:
//!
//! 1. **Normal impulse**: 1-D two-body restitution exchange along the
//!    contact normal, applied as equal-and-opposite velocity corrections.
//! 2. **Sliding friction**: the normal force magnitude `N = m·|Δv_n|/dt`
//!    scales a Coulomb term opposing each body's residual tangential motion.
//! 3. **Rotational friction**: surface speed from spin (`ω × n̂`) feeds a
//!    second Coulomb term; the reaction torque, divided by the solid-sphere
//!    inertia `I = (2/5)·m·r²`, integrates into the spin vector.
//! 4. **Positional correction**: a fraction of the penetration depth is
//!    pushed out along the normal so overlap shrinks every step.
//!
//! Sphere-sphere contacts use restitution 0.8; sphere-cloth contacts are
//! fully inelastic (restitution 0) and only the sphere carries spin.
//!
//! All impulses are applied equal-and-opposite, so linear momentum is
//! conserved exactly. Pinned cloth particles are the exception: they anchor
//! the grid and absorb momentum like fixture points.

use crate::cloth::Cloth;
use crate::collision::detection::{detect_sphere_cloth, detect_sphere_sphere};
use crate::spheres::SphereSet;
use crate::types::{constants, Contact, ContactProperties, ParticleSet, Vec4};

/// Collision resolver over shared particle buffers.
///
/// Stateless; both entry points detect and resolve in one pass, mutating
/// velocity, position, and rotation in place.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Detect and resolve every overlapping sphere pair.
    pub fn collide_spheres(spheres: &mut SphereSet, params: &ContactProperties, dt: f64) {
        for contact in detect_sphere_sphere(spheres) {
            Self::resolve_sphere_pair(spheres, &contact, params, dt);
        }
    }

    /// Detect and resolve every sphere / cloth-particle overlap.
    pub fn collide_cloth(
        spheres: &mut SphereSet,
        cloth: &mut Cloth,
        params: &ContactProperties,
        dt: f64,
    ) {
        for contact in detect_sphere_cloth(spheres, cloth) {
            Self::resolve_cloth_contact(spheres, cloth, &contact, params, dt);
        }
    }

    /// Residual tangential direction of a velocity w.r.t. the contact normal.
    fn tangential_dir(velocity: Vec4, normal: Vec4) -> Vec4 {
        (velocity - velocity.project_onto(&normal)).normalized()
    }

    /// Surface direction at the contact due to spin.
    fn spin_dir(rotation: Vec4, normal: Vec4) -> Vec4 {
        rotation.cross3(&normal).normalized()
    }

    /// Post-exchange normal velocities for a two-body collision.
    ///
    /// `v1' = (m1·v1 + m2·v2 + m2·e·(v2 − v1)) / (m1 + m2)` and the mirror
    /// image for the second body. With e = 1 this is the elastic exchange,
    /// with e = 0 both bodies leave with the common momentum-weighted
    /// velocity.
    fn normal_exchange(
        v1: Vec4,
        v2: Vec4,
        m1: f64,
        m2: f64,
        restitution: f64,
    ) -> (Vec4, Vec4) {
        let total = m1 + m2;
        let momentum = v1 * m1 + v2 * m2;
        let v1_after = (momentum + (v2 - v1) * (m2 * restitution)) / total;
        let v2_after = (momentum + (v1 - v2) * (m1 * restitution)) / total;
        (v1_after, v2_after)
    }

    fn resolve_sphere_pair(
        spheres: &mut SphereSet,
        contact: &Contact,
        params: &ContactProperties,
        dt: f64,
    ) {
        let (i, j) = (contact.a, contact.b);
        let normal = contact.normal;
        let (r1, r2) = (spheres.radius(i), spheres.radius(j));

        let particles = spheres.particles_mut();
        let (m1, m2) = (particles.mass(i), particles.mass(j));

        // bodies already separating only get the push-out; re-applying the
        // exchange would bounce them back into each other every step
        let closing = (particles.velocity(j) - particles.velocity(i)).dot(&normal);
        if closing >= 0.0 {
            Self::push_out(particles, i, j, contact, params);
            return;
        }

        // normal impulse
        let v1 = normal * particles.velocity(i).dot(&normal);
        let v2 = normal * particles.velocity(j).dot(&normal);
        let (v1_after, v2_after) = Self::normal_exchange(v1, v2, m1, m2, params.restitution);
        *particles.velocity_mut(i) += v1_after - v1;
        *particles.velocity_mut(j) += v2_after - v2;

        let normal_force = (v1_after - v1).magnitude() / dt * m1;
        if normal_force < constants::EPSILON {
            // grazing contact, only push-out remains
            Self::push_out(particles, i, j, contact, params);
            return;
        }

        // sliding friction, opposing the residual tangential motion
        let t1 = Self::tangential_dir(particles.velocity(i), normal);
        let t2 = Self::tangential_dir(particles.velocity(j), normal);
        let slide_force = (t2 - t1) * (normal_force * params.friction);

        // rotational friction from surface speed at the contact
        let s1 = Self::spin_dir(particles.rotation(i), normal);
        let s2 = Self::spin_dir(particles.rotation(j), normal);
        let spin_force = (s2 - s1) * (normal_force * params.friction);

        let force_1 = slide_force + spin_force;
        let force_2 = -force_1;
        let kick_1 = force_1 * (dt * particles.inverse_mass(i));
        let kick_2 = force_2 * (dt * particles.inverse_mass(j));
        *particles.velocity_mut(i) += kick_1;
        *particles.velocity_mut(j) += kick_2;

        // friction torque integrates into spin (I = 2/5 m r²)
        let inertia_1 = 0.4 * m1 * r1 * r1;
        let inertia_2 = 0.4 * m2 * r2 * r2;
        *particles.rotation_mut(i) += normal.cross3(&force_1) * (dt / inertia_1);
        *particles.rotation_mut(j) += (-normal).cross3(&force_2) * (dt / inertia_2);

        Self::push_out(particles, i, j, contact, params);
    }

    fn resolve_cloth_contact(
        spheres: &mut SphereSet,
        cloth: &mut Cloth,
        contact: &Contact,
        params: &ContactProperties,
        dt: f64,
    ) {
        let (i, j) = (contact.a, contact.b);
        let normal = contact.normal;
        let radius = spheres.radius(i);

        let sphere = spheres.particles_mut();
        let fabric = cloth.particles_mut();
        let (m1, m2) = (sphere.mass(i), fabric.mass(j));
        let pinned = fabric.is_pinned(j);

        let closing = (fabric.velocity(j) - sphere.velocity(i)).dot(&normal);
        if closing >= 0.0 {
            let correction = normal * (contact.penetration * params.correction);
            if !pinned {
                *fabric.position_mut(j) += correction;
            }
            *sphere.position_mut(i) -= correction;
            return;
        }

        // inelastic normal exchange: both leave with the common velocity
        let v1 = normal * sphere.velocity(i).dot(&normal);
        let v2 = normal * fabric.velocity(j).dot(&normal);
        let (v1_after, v2_after) = Self::normal_exchange(v1, v2, m1, m2, params.restitution);
        *sphere.velocity_mut(i) += v1_after - v1;
        if !pinned {
            *fabric.velocity_mut(j) += v2_after - v2;
        }

        let normal_force = (v1_after - v1).magnitude() / dt * m1;
        if normal_force >= constants::EPSILON {
            let t1 = Self::tangential_dir(sphere.velocity(i), normal);
            let t2 = Self::tangential_dir(fabric.velocity(j), normal);
            let slide_force = (t2 - t1) * (normal_force * params.friction);

            // only the sphere spins; the cloth particle is a point
            let s1 = Self::spin_dir(sphere.rotation(i), normal);
            let spin_force = -s1 * (normal_force * params.friction);

            let force_1 = slide_force + spin_force;
            let kick_sphere = force_1 * (dt * sphere.inverse_mass(i));
            *sphere.velocity_mut(i) += kick_sphere;
            if !pinned {
                let kick_fabric = (-force_1) * (dt * fabric.inverse_mass(j));
                *fabric.velocity_mut(j) += kick_fabric;
            }

            let inertia = 0.4 * m1 * radius * radius;
            *sphere.rotation_mut(i) += normal.cross3(&force_1) * (dt / inertia);
        }

        // push-out: cloth particle outward, sphere back
        let correction = normal * (contact.penetration * params.correction);
        if !pinned {
            *fabric.position_mut(j) += correction;
        }
        *sphere.position_mut(i) -= correction;
    }

    fn push_out(
        particles: &mut ParticleSet,
        a: usize,
        b: usize,
        contact: &Contact,
        params: &ContactProperties,
    ) {
        let correction = contact.normal * (contact.penetration * params.correction);
        *particles.position_mut(b) += correction;
        *particles.position_mut(a) -= correction;
    }
}

// =============================================================================
// Tests
// =============================================================================
