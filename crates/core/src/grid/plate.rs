use super::{linspace, Grid};
use crate::config::require_positive;
use crate::error::{HeatError, Result};
use crate::solver::diffusion::step_plate_cpu;

/// Explicit 2D scheme (five-point stencil) is stable for `s <= 1/4`
const PLATE_STABILITY_LIMIT: f64 = 0.25;

/// Largest relative difference between `dx` and `dy` treated as equal spacing
const SPACING_TOLERANCE: f64 = 1e-9;

/// Uniform 2D discretization of a plate `[0, length_x] × [0, length_y]`
///
/// Fields on this grid are stored row-major with rows along y:
/// index `i * nx + j` holds the point `(x[j], y[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGrid {
    length_x: f64,
    length_y: f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PlateGrid {
    /// Build an `nx × ny` grid over the plate
    ///
    /// # Errors
    ///
    /// `InvalidGrid` if either point count is below 2, `InvalidParameter` if a
    /// length is not a finite positive number or if `dx` and `dy` differ. The
    /// five-point stencil applies one ratio along both axes, so the spacing
    /// must be uniform.
    pub fn new(length_x: f64, length_y: f64, nx: usize, ny: usize) -> Result<Self> {
        if nx < 2 {
            return Err(HeatError::InvalidGrid {
                axis: "x",
                points: nx,
            });
        }
        if ny < 2 {
            return Err(HeatError::InvalidGrid {
                axis: "y",
                points: ny,
            });
        }
        require_positive("length_x", length_x)?;
        require_positive("length_y", length_y)?;

        let dx = length_x / (nx - 1) as f64;
        let dy = length_y / (ny - 1) as f64;
        if (dx - dy).abs() > SPACING_TOLERANCE * dx.max(dy) {
            return Err(HeatError::invalid_parameter(
                "ny",
                format!("{ny} (dx = {dx}, dy = {dy})"),
                "plate spacing must be equal along x and y",
            ));
        }

        Ok(Self {
            length_x,
            length_y,
            nx,
            ny,
            dx,
            dy,
            x: linspace(0.0, length_x, nx),
            y: linspace(0.0, length_y, ny),
        })
    }

    pub fn length_x(&self) -> f64 {
        self.length_x
    }

    pub fn length_y(&self) -> f64 {
        self.length_y
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Row-major index of point `(row, col)`
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.nx + col
    }

    /// Physical position `(x, y)` of point `(row, col)`
    pub fn position(&self, row: usize, col: usize) -> (f64, f64) {
        (self.x[col], self.y[row])
    }
}

impl Grid for PlateGrid {
    fn dimensions(&self) -> usize {
        2
    }

    fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// `dx`, equal to `dy` by construction
    fn spacing(&self) -> f64 {
        self.dx
    }

    fn pulse_index(&self) -> usize {
        self.index(self.ny / 2, self.nx / 2)
    }

    fn stability_limit(&self) -> f64 {
        PLATE_STABILITY_LIMIT
    }

    fn diffuse(&self, s: f64, current: &[f64], next: &mut [f64]) {
        step_plate_cpu(current, next, self.nx, self.ny, s);
    }
}
