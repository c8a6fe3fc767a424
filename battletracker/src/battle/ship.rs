use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::Coordinate;

/// Placement orientation of a ship. The ship's run extends from its anchor
/// toward increasing column (`Horizontal`) or increasing row (`Vertical`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Error returned when parsing an unrecognized orientation string.
///
/// Parsing belongs to the transport boundary; the core only ever sees an
/// already-valid [`Orientation`].
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unrecognized orientation {input:?}, expected \"horizontal\" or \"vertical\"")]
pub struct ParseOrientationError {
    input: String,
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    /// Parse an orientation case-insensitively. Accepts the full word or its
    /// first letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            _ => Err(ParseOrientationError { input: s.into() }),
        }
    }
}

/// A placed ship: its orientation and the coordinates of the grid cells it
/// occupies, in traversal order from the anchor.
///
/// Ships hold coordinates into their owning grid rather than copies of the
/// cells, so a hit marked on the grid is immediately visible to the ship's
/// sunk computation. A ship is created atomically at placement time and is
/// never removed; a sunk ship stays in the grid's ship list with its cells
/// marked hit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Ship {
    orientation: Orientation,
    cells: Vec<Coordinate>,
}

impl Ship {
    pub(super) fn new(orientation: Orientation, cells: Vec<Coordinate>) -> Self {
        Self { orientation, cells }
    }

    /// The orientation this ship was placed with.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The coordinates of the cells this ship occupies, anchor first.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// The anchor coordinate the ship's run was laid out from.
    pub fn anchor(&self) -> Coordinate {
        // Ships are only ever constructed from a nonempty placement run.
        self.cells[0]
    }

    /// The number of cells this ship occupies.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether this ship occupies no cells. Always false for placed ships.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
