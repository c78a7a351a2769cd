//! Geometric primitives for frame layout.
//!
//! Mergeviz uses the same coordinate system as SVG and most screen canvases:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Input sequences are laid out as rows growing downward, and values within a
//! sequence grow rightward.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use mergeviz_core::geometry::Point;
/// let origin = Point::new(100.0, 80.0);
///
/// assert_eq!(origin.x(), 100.0);
/// assert_eq!(origin.y(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the point `steps` grid cells away along each axis.
    ///
    /// This is the building block of every row layout: the `n`th value of
    /// the `m`th row lives at `origin.grid_offset(n, spacing_x, m, spacing_y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mergeviz_core::geometry::Point;
    /// let origin = Point::new(100.0, 80.0);
    /// let cell = origin.grid_offset(2, 80.0, 1, 100.0);
    ///
    /// assert_eq!(cell.x(), 260.0);
    /// assert_eq!(cell.y(), 180.0);
    /// ```
    pub fn grid_offset(self, column: usize, column_spacing: f32, row: usize, row_spacing: f32) -> Self {
        Self {
            x: self.x + column as f32 * column_spacing,
            y: self.y + row as f32 * row_spacing,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn spacing_strategy() -> impl Strategy<Value = f32> {
        1.0f32..200.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Moving one row down should shift y by exactly one spacing and keep x.
    fn check_grid_offset_row_step(origin: Point, row: usize, spacing: f32) -> Result<(), TestCaseError> {
        let here = origin.grid_offset(0, spacing, row, spacing);
        let below = origin.grid_offset(0, spacing, row + 1, spacing);

        prop_assert!(approx_eq!(f32, below.y() - here.y(), spacing, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, below.x(), here.x()));
        Ok(())
    }

    /// Moving one column right should shift x by exactly one spacing and keep y.
    fn check_grid_offset_column_step(
        origin: Point,
        column: usize,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let here = origin.grid_offset(column, spacing, 0, spacing);
        let next = origin.grid_offset(column + 1, spacing, 0, spacing);

        prop_assert!(approx_eq!(f32, next.x() - here.x(), spacing, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, next.y(), here.y()));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn grid_offset_row_step(origin in point_strategy(), row in 0usize..50, spacing in spacing_strategy()) {
            check_grid_offset_row_step(origin, row, spacing)?;
        }

        #[test]
        fn grid_offset_column_step(origin in point_strategy(), column in 0usize..50, spacing in spacing_strategy()) {
            check_grid_offset_column_step(origin, column, spacing)?;
        }
    }
}
