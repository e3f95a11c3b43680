use super::{linspace, Grid};
use crate::config::require_positive;
use crate::error::{HeatError, Result};
use crate::solver::diffusion::step_rod_cpu;

/// Explicit 1D scheme is stable for `s <= 1/2`
const ROD_STABILITY_LIMIT: f64 = 0.5;

/// Uniform 1D discretization of a rod `[0, length]`
#[derive(Debug, Clone, PartialEq)]
pub struct RodGrid {
    length: f64,
    nx: usize,
    dx: f64,
    x: Vec<f64>,
}

impl RodGrid {
    /// Build a grid of `nx` points spanning `[0, length]`
    ///
    /// # Errors
    ///
    /// `InvalidGrid` if `nx < 2`, `InvalidParameter` if `length` is not a
    /// finite positive number.
    pub fn new(length: f64, nx: usize) -> Result<Self> {
        if nx < 2 {
            return Err(HeatError::InvalidGrid {
                axis: "x",
                points: nx,
            });
        }
        require_positive("length_x", length)?;

        Ok(Self {
            length,
            nx,
            dx: length / (nx - 1) as f64,
            x: linspace(0.0, length, nx),
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Point spacing `length / (nx - 1)`
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Coordinates of every point, `x[0] = 0`, `x[nx-1] = length`
    pub fn x(&self) -> &[f64] {
        &self.x
    }
}

impl Grid for RodGrid {
    fn dimensions(&self) -> usize {
        1
    }

    fn shape(&self) -> (usize, usize) {
        (self.nx, 1)
    }

    fn spacing(&self) -> f64 {
        self.dx
    }

    fn pulse_index(&self) -> usize {
        self.nx / 2
    }

    fn stability_limit(&self) -> f64 {
        ROD_STABILITY_LIMIT
    }

    fn diffuse(&self, s: f64, current: &[f64], next: &mut [f64]) {
        step_rod_cpu(current, next, s);
    }
}
