//! # Veil Core
//!
//! A physics core for rigid-sphere and soft-body cloth collision demos.
//!
//! ## Architecture
//!
//! - `types`: core data structures (Vec4, ParticleSet, materials, constants)
//! - `spheres`: growable rigid sphere set over a shared particle buffer
//! - `cloth`: mass-spring cloth grid with pinning
//! - `forces`: gravity and the `ForceModel` accumulation seam
//! - `integrator`: symplectic / explicit Euler steppers
//! - `collision`: brute-force detection and impulse resolution
//! - `materials`: YAML-based material configuration loader
//! - `simulation`: main orchestrator

pub mod cloth;
pub mod collision;
pub mod forces;
pub mod integrator;
pub mod materials;
pub mod simulation;
pub mod spheres;
pub mod types;
