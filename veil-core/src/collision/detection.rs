//! Brute-force contact detection.
//!
//! Spheres collide when center distance is at most the sum of radii; a
//! cloth particle collides with a sphere when it lies within the sphere's
//! radius (cloth particles are points). Every unordered pair is tested,
//! with no spatial partitioning.

use crate::cloth::Cloth;
use crate::spheres::SphereSet;
use crate::types::{constants, Contact, ContactKind};

/// Scan every unordered sphere pair for overlap.
///
/// Contact normals point from the lower-indexed sphere toward the higher.
/// Coincident centers produce no contact (the normal is undefined).
pub fn detect_sphere_sphere(spheres: &SphereSet) -> Vec<Contact> {
    let n = spheres.len();
    let mut contacts = Vec::new();

    for a in 0..n {
        for b in (a + 1)..n {
            let delta = spheres.particles().position(b) - spheres.particles().position(a);
            let distance = delta.magnitude();
            let radius_sum = spheres.radius(a) + spheres.radius(b);

            if distance > radius_sum || distance < constants::EPSILON {
                continue;
            }

            contacts.push(Contact {
                kind: ContactKind::SphereSphere,
                a,
                b,
                normal: delta / distance,
                penetration: radius_sum - distance,
            });
        }
    }

    contacts
}

/// Scan every sphere against every cloth particle.
///
/// Contact normals point from the sphere center toward the cloth particle.
pub fn detect_sphere_cloth(spheres: &SphereSet, cloth: &Cloth) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for a in 0..spheres.len() {
        let center = spheres.particles().position(a);
        let radius = spheres.radius(a);

        for b in 0..cloth.particle_count() {
            let delta = cloth.particles().position(b) - center;
            let distance = delta.magnitude();

            if distance > radius || distance < constants::EPSILON {
                continue;
            }

            contacts.push(Contact {
                kind: ContactKind::SphereCloth,
                a,
                b,
                normal: delta / distance,
                penetration: radius - distance,
            });
        }
    }

    contacts
}

// =============================================================================
// Tests
// =============================================================================
