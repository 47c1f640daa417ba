//! Core types for the physics simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Angular velocity (rotation): radians per second (rad/s)
//! - Mass: kilograms (kg)
//!
//! State vectors are homogeneous 4-component values: `w = 1` for points,
//! `w = 0` for directions. This mirrors the layout the renderer consumes
//! (positions are uploaded as vec4 attributes without conversion).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec4 - Homogeneous 4D Vector
// =============================================================================

/// A homogeneous 4D vector used for positions, velocities, and rotations.
///
/// Coordinate system:
/// - X, Z: horizontal plane
/// - Y: vertical (positive upward)
/// - W: 1 for points, 0 for directions (differences of points have w = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// A point (w = 1)
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// A direction (w = 0)
    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product (all four components; w is 0 on directions)
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Cross product of the xyz parts. The result is a direction (w = 0).
    pub fn cross3(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0,
        }
    }

    /// Project this vector onto another vector
    pub fn project_onto(&self, other: &Self) -> Self {
        let other_mag_sq = other.magnitude_squared();
        if other_mag_sq < 1e-10 {
            Self::ZERO
        } else {
            *other * (self.dot(other) / other_mag_sq)
        }
    }
}

// Operator overloads for Vec4
impl Add for Vec4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self.w += other.w;
    }
}

impl Sub for Vec4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl SubAssign for Vec4 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self.w -= other.w;
    }
}

impl Mul<f64> for Vec4 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w * scalar,
        }
    }
}

impl Div<f64> for Vec4 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
            w: self.w / scalar,
        }
    }
}

impl Neg for Vec4 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl Default for Vec4 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Particle Set
// =============================================================================

/// Structure-of-arrays particle state buffer.
///
/// Each index holds {position, velocity, acceleration, mass, inverse mass,
/// rotation}. Spheres and cloth each own one instance; the collision
/// resolver mutates both through `&mut` references.
///
/// Capacity semantics follow the renderer-facing layout: every slot up to
/// `capacity()` exists (zeroed), and the owning body system tracks how many
/// are live. `resize` preserves existing slots.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    positions: Vec<Vec4>,
    velocities: Vec<Vec4>,
    accelerations: Vec<Vec4>,
    masses: Vec<f64>,
    inverse_masses: Vec<f64>,
    rotations: Vec<Vec4>,
}

impl ParticleSet {
    /// Create a particle set with `capacity` zeroed slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Vec4::ZERO; capacity],
            velocities: vec![Vec4::ZERO; capacity],
            accelerations: vec![Vec4::ZERO; capacity],
            masses: vec![0.0; capacity],
            inverse_masses: vec![0.0; capacity],
            rotations: vec![Vec4::ZERO; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Grow (or shrink) the buffer, zero-filling new slots.
    pub fn resize(&mut self, new_capacity: usize) {
        self.positions.resize(new_capacity, Vec4::ZERO);
        self.velocities.resize(new_capacity, Vec4::ZERO);
        self.accelerations.resize(new_capacity, Vec4::ZERO);
        self.masses.resize(new_capacity, 0.0);
        self.inverse_masses.resize(new_capacity, 0.0);
        self.rotations.resize(new_capacity, Vec4::ZERO);
    }

    pub fn position(&self, i: usize) -> Vec4 {
        self.positions[i]
    }

    pub fn position_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.positions[i]
    }

    pub fn velocity(&self, i: usize) -> Vec4 {
        self.velocities[i]
    }

    pub fn velocity_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.velocities[i]
    }

    pub fn acceleration(&self, i: usize) -> Vec4 {
        self.accelerations[i]
    }

    pub fn acceleration_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.accelerations[i]
    }

    pub fn rotation(&self, i: usize) -> Vec4 {
        self.rotations[i]
    }

    pub fn rotation_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.rotations[i]
    }

    pub fn mass(&self, i: usize) -> f64 {
        self.masses[i]
    }

    pub fn inverse_mass(&self, i: usize) -> f64 {
        self.inverse_masses[i]
    }

    /// Set mass and keep inverse mass consistent.
    pub fn set_mass(&mut self, i: usize, mass: f64) {
        self.masses[i] = mass;
        self.inverse_masses[i] = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    /// Pin a particle in place (infinite effective mass for integration).
    pub fn pin(&mut self, i: usize) {
        self.inverse_masses[i] = 0.0;
    }

    pub fn is_pinned(&self, i: usize) -> bool {
        self.inverse_masses[i] == 0.0
    }

    /// Zero all accelerations, ready for a new accumulation pass.
    pub fn clear_accelerations(&mut self) {
        for a in &mut self.accelerations {
            *a = Vec4::ZERO;
        }
    }
}

// =============================================================================
// Material Properties
// =============================================================================

/// Physical properties of a rigid sphere material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereMaterial {
    pub name: String,

    /// Mass density scale: sphere mass = density * radius³
    pub density: f64,
}

impl SphereMaterial {
    /// Dense demo material, tuned so fist-sized spheres weigh a few kg
    pub fn steel() -> Self {
        Self {
            name: "Steel".to_string(),
            density: constants::SPHERE_DENSITY,
        }
    }
}

impl Default for SphereMaterial {
    fn default() -> Self {
        Self::steel()
    }
}

/// Physical properties of a cloth material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothMaterial {
    pub name: String,

    /// Mass of each grid particle (kg)
    pub particle_mass: f64,

    /// Hooke constants for the three spring families (N/m)
    pub structural_stiffness: f64,
    pub shear_stiffness: f64,
    pub bend_stiffness: f64,

    /// Damper constant along each spring (N·s/m)
    pub damping: f64,
}

impl ClothMaterial {
    /// Plain-weave cotton, soft enough to drape visibly in a few frames
    pub fn cotton() -> Self {
        Self {
            name: "Cotton".to_string(),
            particle_mass: 0.02,
            structural_stiffness: 150.0,
            shear_stiffness: 80.0,
            bend_stiffness: 60.0,
            damping: 0.4,
        }
    }
}

impl Default for ClothMaterial {
    fn default() -> Self {
        Self::cotton()
    }
}

/// Response parameters for a contact pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactProperties {
    pub name: String,

    /// Energy-retention factor of the normal impulse (0 = inelastic)
    pub restitution: f64,

    /// Coulomb friction coefficient for tangential and rotational terms
    pub friction: f64,

    /// Fraction of penetration depth pushed out per step
    pub correction: f64,
}

impl ContactProperties {
    /// Rigid sphere-sphere response
    pub fn rigid() -> Self {
        Self {
            name: "Rigid".to_string(),
            restitution: 0.8,
            friction: constants::FRICTION_COEF,
            correction: 0.15,
        }
    }

    /// Sphere-cloth response: inelastic, same friction and push-out
    pub fn soft() -> Self {
        Self {
            name: "Soft".to_string(),
            restitution: 0.0,
            friction: constants::FRICTION_COEF,
            correction: 0.15,
        }
    }
}

impl Default for ContactProperties {
    fn default() -> Self {
        Self::rigid()
    }
}

// =============================================================================
// Collision Types
// =============================================================================

/// Which body systems a contact joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Both indices address the sphere set
    SphereSphere,
    /// `a` addresses the sphere set, `b` the cloth particle set
    SphereCloth,
}

/// A detected contact between two particles.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub kind: ContactKind,
    pub a: usize,
    pub b: usize,
    /// Unit normal pointing from `a` toward `b`
    pub normal: Vec4,
    /// Overlap depth along the normal (>= 0)
    pub penetration: f64,
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Fixed simulation timestep (s)
    pub const TIMESTEP: f64 = 0.001;

    /// Default Coulomb friction coefficient
    pub const FRICTION_COEF: f64 = 0.3;

    /// Default sphere density (mass = density * radius³)
    pub const SPHERE_DENSITY: f64 = 1000.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec4_operations() {
        let a = Vec4::direction(1.0, 2.0, 3.0);
        let b = Vec4::direction(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec4::direction(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec4::direction(-3.0, -3.0, -3.0));
        assert_eq!(a * 2.0, Vec4::direction(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0); // 1*4 + 2*5 + 3*6 = 32
    }

    #[test]
    fn test_point_difference_is_direction() {
        let p = Vec4::point(1.0, 2.0, 3.0);
        let q = Vec4::point(0.0, 0.0, 0.0);
        let d = p - q;
        assert_eq!(d.w, 0.0);
        assert!((d.magnitude() - 14.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_vec4_cross3() {
        let x = Vec4::direction(1.0, 0.0, 0.0);
        let y = Vec4::direction(0.0, 1.0, 0.0);
        let z = x.cross3(&y);
        assert!((z.x).abs() < 1e-10);
        assert!((z.y).abs() < 1e-10);
        assert!((z.z - 1.0).abs() < 1e-10);
        assert_eq!(z.w, 0.0);
    }

    #[test]
    fn test_vec4_normalized() {
        let v = Vec4::direction(3.0, 4.0, 0.0);
        let n = v.normalized();
        assert!((n.magnitude() - 1.0).abs() < 1e-10);
        assert!((n.x - 0.6).abs() < 1e-10);
        assert!((n.y - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_vec4_normalized_zero() {
        assert_eq!(Vec4::ZERO.normalized(), Vec4::ZERO);
    }

    #[test]
    fn test_vec4_project_onto() {
        let v = Vec4::direction(3.0, 4.0, 0.0);
        let x = Vec4::direction(1.0, 0.0, 0.0);

        // projection keeps only the component along the axis
        assert_eq!(v.project_onto(&x), Vec4::direction(3.0, 0.0, 0.0));
        // residual is orthogonal to the axis
        let residual = v - v.project_onto(&x);
        assert!(residual.dot(&x).abs() < 1e-10);

        // scaling the axis does not change the projection
        assert_eq!(v.project_onto(&(x * 5.0)), Vec4::direction(3.0, 0.0, 0.0));
        // degenerate axis projects to zero
        assert_eq!(v.project_onto(&Vec4::ZERO), Vec4::ZERO);
    }

    #[test]
    fn test_particle_set_resize_preserves_state() {
        let mut particles = ParticleSet::with_capacity(2);
        *particles.position_mut(1) = Vec4::point(1.0, 2.0, 3.0);
        particles.set_mass(1, 4.0);

        particles.resize(8);

        assert_eq!(particles.capacity(), 8);
        assert_eq!(particles.position(1), Vec4::point(1.0, 2.0, 3.0));
        assert!((particles.inverse_mass(1) - 0.25).abs() < 1e-10);
        assert_eq!(particles.position(7), Vec4::ZERO);
    }

    #[test]
    fn test_set_mass_updates_inverse() {
        let mut particles = ParticleSet::with_capacity(1);
        particles.set_mass(0, 2.0);
        assert!((particles.inverse_mass(0) - 0.5).abs() < 1e-10);

        particles.pin(0);
        assert!(particles.is_pinned(0));
        assert_eq!(particles.inverse_mass(0), 0.0);
        // mass is kept for force bookkeeping
        assert!((particles.mass(0) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_clear_accelerations() {
        let mut particles = ParticleSet::with_capacity(3);
        *particles.acceleration_mut(2) = Vec4::direction(0.0, -9.81, 0.0);
        particles.clear_accelerations();
        assert_eq!(particles.acceleration(2), Vec4::ZERO);
    }
}
