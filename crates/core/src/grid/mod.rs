//! Uniform grids for the rod and plate domains
//!
//! A `Grid` knows its shape, spacing, where the initial pulse sits and how to
//! apply its own finite-difference stencil. The integrator is generic over this
//! trait, so stability analysis and snapshotting are written once.

mod plate;
mod rod;

pub use plate::PlateGrid;
pub use rod::RodGrid;

/// Dimensionality-specific behaviour of a uniform grid
pub trait Grid: Send + Sync {
    /// Number of spatial dimensions (1 or 2)
    fn dimensions(&self) -> usize;

    /// Field shape as `(width, height)`; rods report a height of 1
    fn shape(&self) -> (usize, usize);

    /// Total number of grid points
    fn num_points(&self) -> usize {
        let (width, height) = self.shape();
        width * height
    }

    /// Spacing used in the stability ratio (`dx`)
    fn spacing(&self) -> f64;

    /// Row-major index of the point receiving the initial unit pulse
    fn pulse_index(&self) -> usize;

    /// Largest stability ratio for which the explicit scheme is stable
    fn stability_limit(&self) -> f64;

    /// Advance one explicit step: read `current`, write every point of `next`
    ///
    /// Interior points receive the stencil update; boundary points are copied
    /// unchanged from `current`.
    fn diffuse(&self, s: f64, current: &[f64], next: &mut [f64]);
}

/// Evenly spaced coordinates from `start` to `end` inclusive
///
/// The last coordinate is pinned to `end` so rounding in `i * step` never
/// leaves it short of the domain edge.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut coords: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            coords[n - 1] = end;
            coords
        }
    }
}
