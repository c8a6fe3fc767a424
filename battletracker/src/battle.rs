//! The battle aggregate and its mutation rules.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use self::{
    coordinate::Coordinate,
    errors::{
        AttackError, CannotAttackReason, CannotPlaceReason, InvalidConfiguration, PlaceError,
    },
    grid::{CellStatus, Grid, GridCell},
    ship::{Orientation, ParseOrientationError, Ship},
};

mod coordinate;
mod errors;
mod grid;
mod ship;

/// Globally unique identity of a battle, assigned at creation and immutable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleId(Uuid);

impl BattleId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Error returned when an identity string is not a well-formed battle id.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("invalid battle id {input:?}")]
pub struct ParseBattleIdError {
    input: String,
}

impl FromStr for BattleId {
    type Err = ParseBattleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(BattleId)
            .map_err(|_| ParseBattleIdError { input: s.into() })
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle status of a battle. Strictly forward: `Initialized` becomes
/// `InPlay` on the first attack, and `InPlay` becomes `GameOver` when the
/// last ship is sunk. A battle won on its very first attack still passes
/// through `InPlay` within that call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BattleStatus {
    Initialized,
    InPlay,
    GameOver,
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            BattleStatus::Initialized => "Initialized",
            BattleStatus::InPlay => "InPlay",
            BattleStatus::GameOver => "GameOver",
        })
    }
}

/// Outcome of a successfully resolved attack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct AttackResult {
    /// Status of the targeted cell after resolution.
    pub attacked_cell_status: CellStatus,
    /// Whether every ship in the grid is now sunk.
    pub all_ships_sunk: bool,
    /// The battle's status after the attack.
    pub battle_status: BattleStatus,
}

/// One game session: identity, configuration, grid, and lifecycle status.
#[derive(Debug, Clone, Serialize)]
pub struct Battle {
    id: BattleId,
    status: BattleStatus,
    grid: Grid,
}

impl Battle {
    /// Create a battle with an N x N grid of empty cells (N = `dimension`),
    /// a fresh unique identity, and status [`BattleStatus::Initialized`].
    ///
    /// Fails with [`InvalidConfiguration`] if `ship_length` is zero or a ship
    /// of `ship_length` cannot fit in the grid in any orientation.
    pub fn new(
        dimension: usize,
        number_of_ships: usize,
        ship_length: usize,
    ) -> Result<Self, InvalidConfiguration> {
        if ship_length == 0 || ship_length > dimension {
            return Err(InvalidConfiguration {
                dimension,
                ship_length,
            });
        }
        Ok(Self {
            id: BattleId::generate(),
            status: BattleStatus::Initialized,
            grid: Grid::new(dimension, number_of_ships, ship_length),
        })
    }

    /// The unique identity of this battle.
    pub fn id(&self) -> BattleId {
        self.id
    }

    /// The current lifecycle status of this battle.
    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// The grid owned by this battle.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Place a ship of the configured length with its run extending from
    /// `anchor` in the given `orientation`.
    ///
    /// Legality checks run in a fixed order and the first failure wins:
    /// battle over, anchor out of bounds, run does not fit, run overlaps an
    /// existing ship, fleet already full. No cell is mutated unless every
    /// check passes; on success all cells of the run are marked in the same
    /// operation and the new ship is returned.
    pub fn place_ship(
        &mut self,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<&Ship, PlaceError> {
        if self.status == BattleStatus::GameOver {
            return Err(PlaceError::new(CannotPlaceReason::BattleOver, anchor));
        }
        if self.grid.get(anchor).is_none() {
            return Err(PlaceError::new(CannotPlaceReason::OutOfBounds, anchor));
        }
        let run = self
            .grid
            .span(anchor, orientation)
            .ok_or_else(|| PlaceError::new(CannotPlaceReason::InsufficientSpace, anchor))?;
        if !self.grid.all_empty(&run) {
            return Err(PlaceError::new(CannotPlaceReason::AlreadyOccupied, anchor));
        }
        if self.grid.ships().len() >= self.grid.number_of_ships() {
            return Err(PlaceError::new(CannotPlaceReason::FleetFull, anchor));
        }
        Ok(self.grid.commit_ship(orientation, run))
    }

    /// Resolve an attack against the given coordinate.
    ///
    /// Rejected if the battle is over, if the configured fleet has not been
    /// fully placed, or if the coordinate is out of bounds. Otherwise the
    /// first attack moves the battle from `Initialized` to `InPlay`, the
    /// targeted cell is resolved through [`CellStatus::after_attack`]
    /// (re-attacking a resolved cell is allowed and returns the same status),
    /// and the battle ends when every ship is sunk.
    pub fn attack(&mut self, coordinate: Coordinate) -> Result<AttackResult, AttackError> {
        if self.status == BattleStatus::GameOver {
            return Err(AttackError::new(CannotAttackReason::BattleOver, coordinate));
        }
        if !self.grid.fleet_complete() {
            return Err(AttackError::new(
                CannotAttackReason::FleetIncomplete,
                coordinate,
            ));
        }
        if self.grid.get(coordinate).is_none() {
            return Err(AttackError::new(CannotAttackReason::OutOfBounds, coordinate));
        }

        // The game starts on the first attack, before the cell resolves, so a
        // battle won immediately still passes through InPlay.
        if self.status == BattleStatus::Initialized {
            self.status = BattleStatus::InPlay;
        }

        // Coordinate was bounds-checked above.
        let attacked_cell_status = self.grid.resolve_attack(coordinate).unwrap();

        let all_ships_sunk = self.grid.all_ships_sunk();
        if all_ships_sunk {
            self.status = BattleStatus::GameOver;
        }

        Ok(AttackResult {
            attacked_cell_status,
            all_ships_sunk,
            battle_status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(column: usize, row: usize) -> Coordinate {
        Coordinate::new(column, row)
    }

    #[test]
    fn new_battle_is_initialized_with_empty_grid() {
        let battle = Battle::new(10, 6, 3).unwrap();
        assert_eq!(battle.status(), BattleStatus::Initialized);
        assert_eq!(battle.grid().dimension(), 10);
        for row in 0..10 {
            for column in 0..10 {
                let cell = battle.grid().get(coord(column, row)).unwrap();
                assert_eq!(cell.status(), CellStatus::Empty);
            }
        }
    }

    #[test]
    fn distinct_battles_get_distinct_ids() {
        let a = Battle::new(5, 1, 1).unwrap();
        let b = Battle::new(5, 1, 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rejects_ship_longer_than_grid() {
        let err = Battle::new(5, 6, 6).unwrap_err();
        assert_eq!(
            err,
            InvalidConfiguration {
                dimension: 5,
                ship_length: 6,
            },
        );
    }

    #[test]
    fn rejects_zero_length_ships() {
        // A zero-length run would place an empty ship with no anchor cell.
        let err = Battle::new(5, 1, 0).unwrap_err();
        assert_eq!(
            err,
            InvalidConfiguration {
                dimension: 5,
                ship_length: 0,
            },
        );
    }

    #[test]
    fn ship_length_equal_to_dimension_is_allowed() {
        let mut battle = Battle::new(5, 1, 5).unwrap();
        let ship = battle.place_ship(coord(0, 2), Orientation::Horizontal).unwrap();
        assert_eq!(ship.len(), 5);
    }

    #[test]
    fn placed_ship_marks_its_run_in_traversal_order() {
        let mut battle = Battle::new(10, 2, 3).unwrap();
        let ship = battle.place_ship(coord(4, 1), Orientation::Vertical).unwrap();
        assert_eq!(ship.orientation(), Orientation::Vertical);
        assert_eq!(ship.cells(), &[coord(4, 1), coord(4, 2), coord(4, 3)]);
        for row in 1..4 {
            assert_eq!(
                battle.grid().get(coord(4, row)).unwrap().status(),
                CellStatus::Ship,
            );
        }
        assert_eq!(battle.grid().get(coord(4, 4)).unwrap().status(), CellStatus::Empty);
    }

    #[test]
    fn failed_placement_leaves_grid_untouched() {
        let mut battle = Battle::new(10, 2, 4).unwrap();
        let err = battle.place_ship(coord(8, 0), Orientation::Horizontal).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::InsufficientSpace);
        for row in 0..10 {
            for column in 0..10 {
                assert_eq!(
                    battle.grid().get(coord(column, row)).unwrap().status(),
                    CellStatus::Empty,
                );
            }
        }
        assert!(battle.grid().ships().is_empty());
    }

    #[test]
    fn out_of_bounds_anchor_is_rejected() {
        let mut battle = Battle::new(10, 2, 4).unwrap();
        let err = battle.place_ship(coord(10, 0), Orientation::Vertical).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
    }

    #[test]
    fn overlapping_placement_is_rejected() {
        let mut battle = Battle::new(10, 3, 3).unwrap();
        battle.place_ship(coord(2, 2), Orientation::Horizontal).unwrap();
        let err = battle.place_ship(coord(3, 0), Orientation::Vertical).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::AlreadyOccupied);
        // The legal prefix of the rejected run must not have been marked.
        assert_eq!(battle.grid().get(coord(3, 0)).unwrap().status(), CellStatus::Empty);
        assert_eq!(battle.grid().get(coord(3, 1)).unwrap().status(), CellStatus::Empty);
    }

    #[test]
    fn placement_beyond_configured_count_is_rejected() {
        let mut battle = Battle::new(10, 2, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        battle.place_ship(coord(0, 1), Orientation::Horizontal).unwrap();
        let err = battle.place_ship(coord(0, 5), Orientation::Horizontal).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::FleetFull);
    }

    #[test]
    fn attack_requires_complete_fleet() {
        let mut battle = Battle::new(10, 2, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        let err = battle.attack(coord(0, 0)).unwrap_err();
        assert_eq!(err.reason(), CannotAttackReason::FleetIncomplete);
        assert_eq!(battle.status(), BattleStatus::Initialized);
    }

    #[test]
    fn attack_rejects_out_of_bounds_coordinate() {
        let mut battle = Battle::new(5, 1, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        let err = battle.attack(coord(0, 5)).unwrap_err();
        assert_eq!(err.reason(), CannotAttackReason::OutOfBounds);
    }

    #[test]
    fn first_attack_starts_the_game() {
        let mut battle = Battle::new(10, 1, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        let result = battle.attack(coord(5, 5)).unwrap();
        assert_eq!(result.attacked_cell_status, CellStatus::Miss);
        assert_eq!(result.battle_status, BattleStatus::InPlay);
        assert!(!result.all_ships_sunk);
    }

    #[test]
    fn attacking_a_ship_cell_hits() {
        let mut battle = Battle::new(10, 1, 3).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        let result = battle.attack(coord(1, 0)).unwrap();
        assert_eq!(result.attacked_cell_status, CellStatus::Hit);
        assert!(!result.all_ships_sunk);
    }

    #[test]
    fn reattacking_a_resolved_cell_is_idempotent() {
        let mut battle = Battle::new(10, 1, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();

        let first = battle.attack(coord(0, 0)).unwrap();
        let again = battle.attack(coord(0, 0)).unwrap();
        assert_eq!(first.attacked_cell_status, CellStatus::Hit);
        assert_eq!(again.attacked_cell_status, CellStatus::Hit);
        assert!(!again.all_ships_sunk);
        assert_eq!(again.battle_status, BattleStatus::InPlay);

        let miss = battle.attack(coord(5, 5)).unwrap();
        let miss_again = battle.attack(coord(5, 5)).unwrap();
        assert_eq!(miss.attacked_cell_status, CellStatus::Miss);
        assert_eq!(miss_again.attacked_cell_status, CellStatus::Miss);
    }

    #[test]
    fn sinking_the_last_ship_ends_the_game() {
        // The two-ship scenario: 10x10, two horizontal ships of length 2.
        let mut battle = Battle::new(10, 2, 2).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        battle.place_ship(coord(0, 1), Orientation::Horizontal).unwrap();

        for &(column, row) in &[(0, 0), (1, 0), (0, 1)] {
            let result = battle.attack(coord(column, row)).unwrap();
            assert_eq!(result.attacked_cell_status, CellStatus::Hit);
            assert_eq!(result.battle_status, BattleStatus::InPlay);
            assert!(!result.all_ships_sunk);
        }

        let last = battle.attack(coord(1, 1)).unwrap();
        assert_eq!(last.attacked_cell_status, CellStatus::Hit);
        assert!(last.all_ships_sunk);
        assert_eq!(last.battle_status, BattleStatus::GameOver);

        let err = battle.attack(coord(5, 5)).unwrap_err();
        assert_eq!(err.reason(), CannotAttackReason::BattleOver);
    }

    #[test]
    fn winning_on_the_first_attack_passes_through_in_play() {
        let mut battle = Battle::new(5, 1, 1).unwrap();
        battle.place_ship(coord(2, 2), Orientation::Horizontal).unwrap();
        let result = battle.attack(coord(2, 2)).unwrap();
        assert!(result.all_ships_sunk);
        assert_eq!(result.battle_status, BattleStatus::GameOver);
    }

    #[test]
    fn placement_after_game_over_is_rejected() {
        let mut battle = Battle::new(5, 1, 1).unwrap();
        battle.place_ship(coord(0, 0), Orientation::Horizontal).unwrap();
        battle.attack(coord(0, 0)).unwrap();
        let err = battle.place_ship(coord(3, 3), Orientation::Vertical).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::BattleOver);
    }

    #[test]
    fn sunk_ships_remain_in_the_ship_list() {
        let mut battle = Battle::new(5, 1, 1).unwrap();
        battle.place_ship(coord(1, 1), Orientation::Vertical).unwrap();
        battle.attack(coord(1, 1)).unwrap();
        assert_eq!(battle.grid().ships().len(), 1);
        assert!(battle.grid().is_sunk(&battle.grid().ships()[0]));
    }

    #[test]
    fn battle_id_round_trips_through_strings() {
        let battle = Battle::new(5, 1, 1).unwrap();
        let parsed: BattleId = battle.id().to_string().parse().unwrap();
        assert_eq!(parsed, battle.id());
        assert!("not-a-battle-id".parse::<BattleId>().is_err());
    }
}
