//! The grid for a single battle: the cell matrix, the placed ships, and the
//! battle's ship configuration.

use serde::{Deserialize, Serialize};

use crate::battle::{Coordinate, Orientation, Ship};

/// Occupancy and attack state of a single grid cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CellStatus {
    /// Open water, never attacked.
    Empty,
    /// Occupied by a ship, never attacked.
    Ship,
    /// A ship cell that has been attacked.
    Hit,
    /// An empty cell that has been attacked.
    Miss,
}

impl CellStatus {
    /// The cell-status transition law for attack resolution.
    ///
    /// `Empty` resolves to `Miss` and `Ship` to `Hit`; `Hit` and `Miss` are
    /// absorbing, so repeated attacks on an already-resolved cell return the
    /// same status unchanged.
    pub fn after_attack(self) -> CellStatus {
        match self {
            CellStatus::Empty => CellStatus::Miss,
            CellStatus::Ship => CellStatus::Hit,
            resolved => resolved,
        }
    }
}

/// A single cell in the grid. Created once per coordinate when the grid is
/// constructed; only its status ever changes.
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    coordinate: Coordinate,
    status: CellStatus,
}

impl GridCell {
    fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            status: CellStatus::Empty,
        }
    }

    /// The fixed coordinate this cell was created at.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// The current status of this cell.
    pub fn status(&self) -> CellStatus {
        self.status
    }
}

/// The square cell matrix for a battle, plus the ships placed on it and the
/// configured ship count and length.
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    dimension: usize,
    number_of_ships: usize,
    ship_length: usize,
    /// Cells in row-major order, indexed by `row * dimension + column`.
    cells: Box<[GridCell]>,
    /// Ships in placement order. Never shrinks; sunk ships stay listed.
    ships: Vec<Ship>,
}

impl Grid {
    /// Construct a `dimension` x `dimension` grid of empty cells.
    pub(super) fn new(dimension: usize, number_of_ships: usize, ship_length: usize) -> Self {
        let cells = (0..dimension * dimension)
            .map(|idx| GridCell::new(Coordinate::new(idx % dimension, idx / dimension)))
            .collect();
        Self {
            dimension,
            number_of_ships,
            ship_length,
            cells,
            ships: Vec::with_capacity(number_of_ships),
        }
    }

    /// The edge length of this square grid.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The number of ships this battle was configured for.
    pub fn number_of_ships(&self) -> usize {
        self.number_of_ships
    }

    /// The length of every ship in this battle.
    pub fn ship_length(&self) -> usize {
        self.ship_length
    }

    /// The ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Whether the configured number of ships has been placed.
    pub fn fleet_complete(&self) -> bool {
        self.ships.len() == self.number_of_ships
    }

    /// Check the given coordinate against the grid bounds and convert it to a
    /// linear cell index. Returns `None` if out of bounds.
    fn linearize(&self, coord: Coordinate) -> Option<usize> {
        if coord.column < self.dimension && coord.row < self.dimension {
            Some(coord.row * self.dimension + coord.column)
        } else {
            None
        }
    }

    /// Get the cell at the given coordinate. Returns `None` if the coordinate
    /// is out of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<&GridCell> {
        self.linearize(coord).map(|idx| &self.cells[idx])
    }

    /// The full run of `ship_length` coordinates extending from the anchor in
    /// the given orientation. Returns `None` if the run does not fit inside
    /// the grid.
    ///
    /// The far edge is checked inclusively (`anchor + ship_length <=
    /// dimension`), so a ship may end flush against the last row or column.
    pub(super) fn span(&self, anchor: Coordinate, orientation: Orientation) -> Option<Vec<Coordinate>> {
        let (fixed, moving) = match orientation {
            Orientation::Horizontal => (anchor.row, anchor.column),
            Orientation::Vertical => (anchor.column, anchor.row),
        };
        // Subtract rather than add so absurd anchors can't overflow.
        if fixed >= self.dimension
            || moving >= self.dimension
            || self.dimension - moving < self.ship_length
        {
            return None;
        }
        Some(
            (moving..moving + self.ship_length)
                .map(|m| match orientation {
                    Orientation::Horizontal => Coordinate::new(m, anchor.row),
                    Orientation::Vertical => Coordinate::new(anchor.column, m),
                })
                .collect(),
        )
    }

    /// Whether every coordinate in the run is currently an empty cell.
    /// Coordinates must already be bounds-checked.
    pub(super) fn all_empty(&self, run: &[Coordinate]) -> bool {
        run.iter()
            .all(|&coord| self.get(coord).map(|cell| cell.status) == Some(CellStatus::Empty))
    }

    /// Mark every cell in the run as occupied and record the ship. Callers
    /// must have validated the run completely; this performs the mutation
    /// without further checks so placement is all-or-nothing.
    pub(super) fn commit_ship(&mut self, orientation: Orientation, run: Vec<Coordinate>) -> &Ship {
        for &coord in &run {
            // The run was produced by `span`, so every coordinate is in bounds.
            let idx = self.linearize(coord).unwrap();
            self.cells[idx].status = CellStatus::Ship;
        }
        self.ships.push(Ship::new(orientation, run));
        self.ships.last().unwrap()
    }

    /// Apply the attack transition law to the cell at the given coordinate and
    /// return its post-resolution status. Returns `None` if out of bounds.
    pub(super) fn resolve_attack(&mut self, coord: Coordinate) -> Option<CellStatus> {
        let idx = self.linearize(coord)?;
        let cell = &mut self.cells[idx];
        cell.status = cell.status.after_attack();
        Some(cell.status)
    }

    /// Whether every cell of the given ship has been hit.
    pub fn is_sunk(&self, ship: &Ship) -> bool {
        ship.cells()
            .iter()
            .all(|&coord| self.get(coord).map(|cell| cell.status) == Some(CellStatus::Hit))
    }

    /// Whether every placed ship is sunk. Meaningful once the fleet is
    /// complete; vacuously true on an empty ship list.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(|ship| self.is_sunk(ship))
    }
}
