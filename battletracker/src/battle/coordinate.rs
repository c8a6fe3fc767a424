use std::fmt;

use serde::{Deserialize, Serialize};

/// The (column, row) position of a single cell in a battle grid.
///
/// Coordinates are zero-indexed values with no lifecycle of their own; they
/// are compared by equality and copied freely. Bounds are a property of the
/// grid, not the coordinate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position of the cell.
    pub column: usize,
    /// Vertical position of the cell.
    pub row: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `column` and `row`.
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from a `(column, row)` pair.
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(column, row)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.column, coord.row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}
