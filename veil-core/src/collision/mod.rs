//! Collision detection and resolution for rigid spheres and cloth.
//!
//! This module handles:
//! - **Detection**: brute-force overlap scans producing `Contact` records
//! - **Resolution**: impulse response with friction, spin, and push-out
//!
//! Detection is deliberately O(n²) / O(n·m): the demo runs a handful of
//! spheres against one cloth grid, far below the point where spatial
//! partitioning pays for itself.
//!
//! ```text
//!        before                 after
//!      ●──→  ←──●            ←──●  ●──→
//!        overlap             impulse + push-out
//! ```

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
