//! Temperature field storage
//!
//! Fields are stored as a flat `Vec<f64>` in row-major order. A rod is a field
//! with a single row.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Scalar temperature field over a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field values in row-major order (row * width + col)
    pub data: Vec<f64>,
    /// Points per row
    pub width: usize,
    /// Number of rows (1 for a rod)
    pub height: usize,
}

impl Field {
    /// Create a new field with given dimensions, initialized to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Zero field shaped like `grid`
    #[must_use]
    pub fn zeros_like<G: Grid + ?Sized>(grid: &G) -> Self {
        let (width, height) = grid.shape();
        Self::new(width, height)
    }

    /// Initial condition: zero everywhere except a unit pulse at the grid centre
    ///
    /// The centre is `n / 2` on each axis (floor division), so even-sized
    /// grids place the pulse just past the midpoint.
    #[must_use]
    pub fn unit_pulse<G: Grid + ?Sized>(grid: &G) -> Self {
        let mut field = Self::zeros_like(grid);
        field.data[grid.pulse_index()] = 1.0;
        field
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        assert!(
            col < self.width && row < self.height,
            "Coordinates out of bounds"
        );
        self.data[row * self.width + col]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        assert!(
            col < self.width && row < self.height,
            "Coordinates out of bounds"
        );
        self.data[row * self.width + col] = value;
    }

    /// Total heat content (sum of all values)
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest value, `NEG_INFINITY` for an empty field
    #[must_use]
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value, `INFINITY` for an empty field
    #[must_use]
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Row-major index of the first maximum
    #[must_use]
    pub fn argmax(&self) -> Option<usize> {
        self.data
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (idx, &value)| match best {
                Some((_, top)) if top >= value => best,
                _ => Some((idx, value)),
            })
            .map(|(idx, _)| idx)
    }

    /// Whether `idx` lies on the outer edge of the field
    #[must_use]
    pub fn is_boundary(&self, idx: usize) -> bool {
        let (row, col) = (idx / self.width, idx % self.width);
        let vertical_edge = col == 0 || col == self.width - 1;
        if self.height == 1 {
            return vertical_edge;
        }
        vertical_edge || row == 0 || row == self.height - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{PlateGrid, RodGrid};

    #[test]
    fn test_field_creation() {
        let field = Field::new(10, 20);
        assert_eq!(field.width, 10);
        assert_eq!(field.height, 20);
        assert_eq!(field.len(), 200);
        assert!(field.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_get_set() {
        let mut field = Field::new(10, 10);
        field.set(3, 4, 123.45);
        assert_eq!(field.get(3, 4), 123.45);

        // Verify row-major indexing
        let index = 4 * 10 + 3;
        assert_eq!(field.data[index], 123.45);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_field_bounds_check() {
        let field = Field::new(10, 10);
        let _ = field.get(10, 5);
    }

    #[test]
    fn test_rod_unit_pulse() {
        let grid = RodGrid::new(1.0, 100).unwrap();
        let field = Field::unit_pulse(&grid);
        assert_eq!((field.width, field.height), (100, 1));
        assert_eq!(field.sum(), 1.0);
        assert_eq!(field.data[50], 1.0);
        assert_eq!(field.argmax(), Some(50));
    }

    #[test]
    fn test_plate_unit_pulse() {
        let grid = PlateGrid::new(1.0, 1.0, 50, 50).unwrap();
        let field = Field::unit_pulse(&grid);
        assert_eq!(field.sum(), 1.0);
        assert_eq!(field.get(25, 25), 1.0);
        assert_eq!(field.max(), 1.0);
        assert_eq!(field.min(), 0.0);
    }

    #[test]
    fn test_argmax_prefers_first() {
        let field = Field {
            data: vec![0.0, 2.0, 1.0, 2.0],
            width: 4,
            height: 1,
        };
        assert_eq!(field.argmax(), Some(1));
        assert_eq!(Field::new(0, 0).argmax(), None);
    }

    #[test]
    fn test_is_boundary() {
        let rod = Field::new(5, 1);
        assert!(rod.is_boundary(0));
        assert!(rod.is_boundary(4));
        assert!(!rod.is_boundary(2));

        let plate = Field::new(4, 3);
        assert!(plate.is_boundary(0));
        assert!(plate.is_boundary(3));
        assert!(plate.is_boundary(4));
        assert!(!plate.is_boundary(5));
        assert!(!plate.is_boundary(6));
        assert!(plate.is_boundary(7));
        assert!(plate.is_boundary(9));
    }
}
