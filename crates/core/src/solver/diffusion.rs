//! Explicit finite-difference diffusion stencils
//!
//! Forward Euler in time, centred second differences in space:
//! ```text
//! 1D: u'[i]    = u[i]    + s (u[i+1] - 2u[i] + u[i-1])
//! 2D: u'[i][j] = u[i][j] + s (u[i+1][j] + u[i-1][j] + u[i][j+1] + u[i][j-1] - 4u[i][j])
//! ```
//! with `s = α·dt/dx²`.
//!
//! Both kernels read only from the input buffer and write every point of the
//! output buffer. Boundary points are copied through unchanged, which holds them
//! at their initial value (Dirichlet).

use rayon::prelude::*;

/// One explicit step of the 1D rod stencil
///
/// # Arguments
///
/// * `u` - Field at the current step
/// * `u_new` - Output buffer, same length as `u`
/// * `s` - Stability ratio `α·dt/dx²`
pub fn step_rod_cpu(u: &[f64], u_new: &mut [f64], s: f64) {
    debug_assert_eq!(u.len(), u_new.len());
    let n = u.len();

    u_new.copy_from_slice(u);
    for i in 1..n.saturating_sub(1) {
        u_new[i] = u[i] + s * (u[i + 1] - 2.0 * u[i] + u[i - 1]);
    }
}

/// One explicit step of the 2D plate stencil
///
/// Rows are independent within a step, so they are swept in parallel. Every
/// output value depends only on `u`, which keeps the result identical to a
/// sequential sweep.
///
/// # Arguments
///
/// * `u` - Field at the current step, row-major (`row * width + col`)
/// * `u_new` - Output buffer, same length as `u`
/// * `width` - Points per row (nx)
/// * `height` - Number of rows (ny)
/// * `s` - Stability ratio `α·dt/dx²`
pub fn step_plate_cpu(u: &[f64], u_new: &mut [f64], width: usize, height: usize, s: f64) {
    debug_assert_eq!(u.len(), width * height);
    debug_assert_eq!(u_new.len(), width * height);

    u_new
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            let base = row * width;

            // Top and bottom edges
            if row == 0 || row == height - 1 {
                out_row.copy_from_slice(&u[base..base + width]);
                return;
            }

            for (col, cell) in out_row.iter_mut().enumerate() {
                let idx = base + col;

                // Left and right edges
                if col == 0 || col == width - 1 {
                    *cell = u[idx];
                    continue;
                }

                let center = u[idx];
                let laplacian =
                    u[idx + width] + u[idx - width] + u[idx + 1] + u[idx - 1] - 4.0 * center;
                *cell = center + s * laplacian;
            }
        });
}
