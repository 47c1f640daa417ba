//! Soft-body cloth as a mass-spring particle grid.
//!
//! The cloth is a square grid of `particles_per_edge²` particles joined by
//! three spring families:
//!
//! ```text
//! structural: ●──●      shear: ●  ●      bend: ●──────●
//!             │              \ /               (skips one)
//!             ●               ●
//! ```
//!
//! Structural springs resist stretch, shear springs resist in-plane
//! collapse, bend springs resist folding. Each spring also carries a damper
//! along its axis so the grid settles instead of ringing forever.

use crate::types::{ClothMaterial, ParticleSet, Vec4};

/// One spring joining two grid particles.
#[derive(Debug, Clone, Copy)]
struct Spring {
    a: usize,
    b: usize,
    rest_length: f64,
    stiffness: f64,
}

/// A square cloth grid owning its particle buffer.
#[derive(Debug, Clone)]
pub struct Cloth {
    particles: ParticleSet,
    springs: Vec<Spring>,
    particles_per_edge: usize,
    material: ClothMaterial,
}

impl Cloth {
    /// Build a flat grid in the XZ plane.
    ///
    /// `origin` is the corner particle (row 0, col 0); the grid extends
    /// `size` meters along +X (columns) and +Z (rows).
    pub fn new_grid(origin: Vec4, size: f64, particles_per_edge: usize, material: ClothMaterial) -> Self {
        assert!(particles_per_edge >= 2, "cloth needs at least a 2x2 grid");

        let n = particles_per_edge;
        let spacing = size / (n - 1) as f64;

        let mut particles = ParticleSet::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let i = row * n + col;
                *particles.position_mut(i) = Vec4::point(
                    origin.x + col as f64 * spacing,
                    origin.y,
                    origin.z + row as f64 * spacing,
                );
                particles.set_mass(i, material.particle_mass);
            }
        }

        let mut springs = Vec::new();
        let at = |row: usize, col: usize| row * n + col;
        for row in 0..n {
            for col in 0..n {
                // structural: right and down neighbors
                if col + 1 < n {
                    springs.push(Spring {
                        a: at(row, col),
                        b: at(row, col + 1),
                        rest_length: spacing,
                        stiffness: material.structural_stiffness,
                    });
                }
                if row + 1 < n {
                    springs.push(Spring {
                        a: at(row, col),
                        b: at(row + 1, col),
                        rest_length: spacing,
                        stiffness: material.structural_stiffness,
                    });
                }
                // shear: both diagonals of each cell (register each cell once)
                if row + 1 < n && col + 1 < n {
                    let diagonal = spacing * std::f64::consts::SQRT_2;
                    springs.push(Spring {
                        a: at(row, col),
                        b: at(row + 1, col + 1),
                        rest_length: diagonal,
                        stiffness: material.shear_stiffness,
                    });
                    springs.push(Spring {
                        a: at(row, col + 1),
                        b: at(row + 1, col),
                        rest_length: diagonal,
                        stiffness: material.shear_stiffness,
                    });
                }
                // bend: skip-one connections
                if col + 2 < n {
                    springs.push(Spring {
                        a: at(row, col),
                        b: at(row, col + 2),
                        rest_length: 2.0 * spacing,
                        stiffness: material.bend_stiffness,
                    });
                }
                if row + 2 < n {
                    springs.push(Spring {
                        a: at(row, col),
                        b: at(row + 2, col),
                        rest_length: 2.0 * spacing,
                        stiffness: material.bend_stiffness,
                    });
                }
            }
        }

        Self {
            particles,
            springs,
            particles_per_edge: n,
            material,
        }
    }

    pub fn particles_per_edge(&self) -> usize {
        self.particles_per_edge
    }

    /// Total particle count (`particles_per_edge²`).
    pub fn particle_count(&self) -> usize {
        self.particles_per_edge * self.particles_per_edge
    }

    /// Buffer index of a grid coordinate.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.particles_per_edge + col
    }

    pub fn material(&self) -> &ClothMaterial {
        &self.material
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    /// Pin one particle in place.
    pub fn pin(&mut self, row: usize, col: usize) {
        let i = self.index(row, col);
        self.particles.pin(i);
    }

    /// Pin the whole first row (curtain-like behavior).
    pub fn pin_top_row(&mut self) {
        for col in 0..self.particles_per_edge {
            self.pin(0, col);
        }
    }

    /// Accumulate spring and damper accelerations into the particle buffer.
    ///
    /// Hooke force along the spring axis plus a damper on the relative
    /// velocity component along that axis. Forces are equal and opposite,
    /// scaled by each endpoint's inverse mass (pinned ends absorb nothing).
    pub fn accumulate_spring_forces(&mut self) {
        for spring in &self.springs {
            let delta = self.particles.position(spring.b) - self.particles.position(spring.a);
            let length = delta.magnitude();
            if length < crate::types::constants::EPSILON {
                continue;
            }
            let axis = delta / length;

            // positive = stretched, pulls endpoints together
            let stretch = length - spring.rest_length;
            let relative_speed =
                (self.particles.velocity(spring.b) - self.particles.velocity(spring.a)).dot(&axis);

            let force_mag = spring.stiffness * stretch + self.material.damping * relative_speed;
            let force = axis * force_mag;

            let inv_a = self.particles.inverse_mass(spring.a);
            let inv_b = self.particles.inverse_mass(spring.b);
            *self.particles.acceleration_mut(spring.a) += force * inv_a;
            *self.particles.acceleration_mut(spring.b) -= force * inv_b;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants;

    fn small_cloth() -> Cloth {
        Cloth::new_grid(Vec4::point(0.0, 1.0, 0.0), 1.0, 4, ClothMaterial::default())
    }

    #[test]
    fn test_grid_layout() {
        let cloth = small_cloth();
        assert_eq!(cloth.particle_count(), 16);

        // corner and opposite corner
        assert_eq!(cloth.particles().position(cloth.index(0, 0)), Vec4::point(0.0, 1.0, 0.0));
        assert_eq!(cloth.particles().position(cloth.index(3, 3)), Vec4::point(1.0, 1.0, 1.0));

        // every particle carries the material mass
        for i in 0..cloth.particle_count() {
            assert!((cloth.particles().mass(i) - cloth.material().particle_mass).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rest_grid_has_no_spring_force() {
        let mut cloth = small_cloth();
        cloth.accumulate_spring_forces();

        for i in 0..cloth.particle_count() {
            let a = cloth.particles().acceleration(i);
            assert!(
                a.magnitude() < 1e-9,
                "rest grid should be force-free, particle {} has |a|={}",
                i,
                a.magnitude()
            );
        }
    }

    #[test]
    fn test_stretched_spring_pulls_back() {
        let mut cloth = small_cloth();

        // pull the corner outward along -X, stretching its structural spring
        let corner = cloth.index(0, 0);
        cloth.particles_mut().position_mut(corner).x -= 0.1;

        cloth.accumulate_spring_forces();

        let a_corner = cloth.particles().acceleration(corner);
        assert!(
            a_corner.x > 0.0,
            "stretched corner should be pulled back toward the grid, got ax={}",
            a_corner.x
        );

        // its right-hand neighbor is pulled toward the corner
        let neighbor = cloth.index(0, 1);
        assert!(cloth.particles().acceleration(neighbor).x < 0.0);
    }

    #[test]
    fn test_pinned_particle_absorbs_no_force() {
        let mut cloth = small_cloth();
        cloth.pin(0, 0);

        let corner = cloth.index(0, 0);
        cloth.particles_mut().position_mut(corner).x -= 0.1;
        cloth.accumulate_spring_forces();

        assert!(cloth.particles().acceleration(corner).magnitude() < constants::EPSILON);
    }

    #[test]
    fn test_pin_top_row() {
        let mut cloth = small_cloth();
        cloth.pin_top_row();

        for col in 0..4 {
            assert!(cloth.particles().is_pinned(cloth.index(0, col)));
        }
        assert!(!cloth.particles().is_pinned(cloth.index(1, 0)));
    }
}
