//! Python bindings for the veil-core physics engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from veil_physics import Simulation
//!
//! sim = Simulation()
//! sim.spawn_cloth(-0.5, 1.0, -0.5, 1.0, 20)
//! sim.pin_cloth_top_row()
//! ball = sim.add_sphere(0.0, 2.0, 0.0, 0.2)
//!
//! for _ in range(1000):
//!     sim.step()
//! x, y, z, _ = sim.sphere_position(ball).to_tuple()
//! ```

use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;

use veil_core::simulation::Simulation as CoreSimulation;
use veil_core::types::{ClothMaterial, Vec4 as CoreVec4};

/// Homogeneous 4D vector (w = 1 for points, 0 for directions).
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec4 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
    #[pyo3(get, set)]
    pub w: f64,
}

#[pymethods]
impl Vec4 {
    #[new]
    fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    fn __repr__(&self) -> String {
        format!(
            "Vec4({:.4}, {:.4}, {:.4}, {:.1})",
            self.x, self.y, self.z, self.w
        )
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.z, self.w)
    }
}

impl From<CoreVec4> for Vec4 {
    fn from(v: CoreVec4) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

impl From<Vec4> for CoreVec4 {
    fn from(v: Vec4) -> Self {
        CoreVec4::new(v.x, v.y, v.z, v.w)
    }
}

/// Main simulation class.
///
/// Owns the sphere set and cloth; each `step()` advances one fixed
/// timestep and leaves the particle state readable for rendering.
#[pyclass]
pub struct Simulation {
    inner: CoreSimulation,
}

#[pymethods]
impl Simulation {
    #[new]
    fn new() -> Self {
        Self {
            inner: CoreSimulation::new(),
        }
    }

    /// Add a rigid sphere at rest. Returns its index.
    fn add_sphere(&mut self, x: f64, y: f64, z: f64, radius: f64) -> usize {
        self.inner.add_sphere(CoreVec4::point(x, y, z), radius)
    }

    /// Set a sphere's velocity (e.g. to throw it at the cloth).
    fn set_sphere_velocity(&mut self, index: usize, x: f64, y: f64, z: f64) -> PyResult<()> {
        if index >= self.inner.spheres().len() {
            return Err(PyIndexError::new_err(format!("no sphere {}", index)));
        }
        *self.inner.spheres_mut().particles_mut().velocity_mut(index) =
            CoreVec4::direction(x, y, z);
        Ok(())
    }

    /// Create a square cloth grid: corner at (x, y, z), `size` meters on a
    /// side, `particles_per_edge`² particles.
    fn spawn_cloth(&mut self, x: f64, y: f64, z: f64, size: f64, particles_per_edge: usize) {
        self.inner.spawn_cloth(
            CoreVec4::point(x, y, z),
            size,
            particles_per_edge,
            ClothMaterial::default(),
        );
    }

    /// Pin the cloth's first row in place (curtain behavior).
    fn pin_cloth_top_row(&mut self) -> PyResult<()> {
        match self.inner.cloth_mut() {
            Some(cloth) => {
                cloth.pin_top_row();
                Ok(())
            }
            None => Err(PyIndexError::new_err("no cloth spawned")),
        }
    }

    /// Advance one fixed timestep.
    fn step(&mut self) {
        self.inner.step();
    }

    /// Elapsed simulated time in seconds.
    fn time(&self) -> f64 {
        self.inner.time()
    }

    fn sphere_count(&self) -> usize {
        self.inner.spheres().len()
    }

    fn sphere_position(&self, index: usize) -> PyResult<Vec4> {
        if index >= self.inner.spheres().len() {
            return Err(PyIndexError::new_err(format!("no sphere {}", index)));
        }
        Ok(self.inner.spheres().particles().position(index).into())
    }

    fn sphere_velocity(&self, index: usize) -> PyResult<Vec4> {
        if index >= self.inner.spheres().len() {
            return Err(PyIndexError::new_err(format!("no sphere {}", index)));
        }
        Ok(self.inner.spheres().particles().velocity(index).into())
    }

    fn sphere_rotation(&self, index: usize) -> PyResult<Vec4> {
        if index >= self.inner.spheres().len() {
            return Err(PyIndexError::new_err(format!("no sphere {}", index)));
        }
        Ok(self.inner.spheres().particles().rotation(index).into())
    }

    fn sphere_radius(&self, index: usize) -> PyResult<f64> {
        if index >= self.inner.spheres().len() {
            return Err(PyIndexError::new_err(format!("no sphere {}", index)));
        }
        Ok(self.inner.spheres().radius(index))
    }

    /// All cloth particle positions, row-major, for upload to the renderer.
    fn cloth_positions(&self) -> Vec<Vec4> {
        match self.inner.cloth() {
            Some(cloth) => (0..cloth.particle_count())
                .map(|i| cloth.particles().position(i).into())
                .collect(),
            None => Vec::new(),
        }
    }

    fn cloth_particle_count(&self) -> usize {
        self.inner.cloth().map_or(0, |c| c.particle_count())
    }
}

/// Python module definition.
#[pymodule]
fn veil_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec4>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
