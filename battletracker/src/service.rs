//! The battle service: the four operations exposed to the transport layer.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    battle::{
        AttackError, AttackResult, Battle, BattleId, BattleStatus, CannotPlaceReason, Coordinate,
        InvalidConfiguration, Orientation, ParseBattleIdError, PlaceError, Ship,
    },
    directory::{BattleDirectory, SharedBattle},
};

/// Alias for results returned by the service.
pub type Result<T> = std::result::Result<T, Error>;

/// The full error taxonomy surfaced to callers.
///
/// Every variant is a local validation outcome scoped to one request: none
/// is retried internally, none is fatal to the process, and each carries a
/// human-readable reason. The transport layer maps these onto response
/// codes (conflict-style for state and legality violations, bad-input for
/// malformed identifiers, not-found for missing battles).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Battle parameters physically cannot produce a valid game.
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),

    /// The identity string is not a well-formed battle id.
    #[error(transparent)]
    InvalidIdentity(#[from] ParseBattleIdError),

    /// The identity is well-formed but no matching battle is registered.
    #[error("no battle exists with id {id}")]
    BattleNotFound { id: BattleId },

    /// A ship placement was attempted after the game ended.
    #[error("this battle is over, ship can't be created")]
    BattleAlreadyOver,

    /// A ship placement was out of bounds, overlapping, or over capacity.
    #[error("ship can't be created: {0}")]
    InvalidShipPlacement(PlaceError),

    /// An attack was rejected: fleet incomplete, coordinate out of bounds,
    /// or battle already over.
    #[error("attack failed: {0}")]
    AttackFailed(#[from] AttackError),
}

impl From<PlaceError> for Error {
    fn from(err: PlaceError) -> Self {
        match err.reason() {
            CannotPlaceReason::BattleOver => Error::BattleAlreadyOver,
            _ => Error::InvalidShipPlacement(err),
        }
    }
}

/// Summary of a newly-created battle, shaped for serialization by the
/// transport layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct BattleSummary {
    pub id: BattleId,
    pub status: BattleStatus,
    pub dimension: usize,
    pub number_of_ships: usize,
    pub ship_length: usize,
}

/// Facade over the [`BattleDirectory`] exposing the four core operations.
///
/// The service owns no state of its own; it parses identity strings, locks
/// the targeted battle, applies the operation, and folds core errors into
/// the service [`Error`] taxonomy. Operations on different battles never
/// block each other.
#[derive(Debug, Default)]
pub struct BattleService {
    directory: BattleDirectory,
}

impl BattleService {
    /// Create a service backed by an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory of battles this service operates on.
    pub fn directory(&self) -> &BattleDirectory {
        &self.directory
    }

    /// Create a battle with the given configuration and register it.
    pub fn create_battle(
        &self,
        dimension: usize,
        number_of_ships: usize,
        ship_length: usize,
    ) -> Result<BattleSummary> {
        let battle = Battle::new(dimension, number_of_ships, ship_length).map_err(|err| {
            warn!(dimension, ship_length, "rejected battle configuration");
            err
        })?;
        let summary = BattleSummary {
            id: battle.id(),
            status: battle.status(),
            dimension,
            number_of_ships,
            ship_length,
        };
        self.directory.register(battle);
        info!(id = %summary.id, dimension, number_of_ships, ship_length, "battle initiated");
        Ok(summary)
    }

    /// Look up the lifecycle status of the battle with the given identity.
    pub fn battle_status(&self, battle_id: &str) -> Result<BattleStatus> {
        let battle = self.find_battle(battle_id)?;
        let status = battle.lock().unwrap().status();
        Ok(status)
    }

    /// Place a ship on the identified battle, anchored at `anchor` and
    /// extending in `orientation`.
    pub fn place_ship(
        &self,
        battle_id: &str,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<Ship> {
        let shared = self.find_battle(battle_id)?;
        let mut battle = shared.lock().unwrap();
        let ship = match battle.place_ship(anchor, orientation) {
            Ok(ship) => ship.clone(),
            Err(err) => {
                warn!(id = %battle.id(), %anchor, "rejected ship placement: {}", err.reason());
                return Err(err.into());
            }
        };
        info!(
            id = %battle.id(),
            %anchor,
            placed = battle.grid().ships().len(),
            of = battle.grid().number_of_ships(),
            "ship placed"
        );
        Ok(ship)
    }

    /// Resolve an attack against the identified battle.
    pub fn attack(&self, battle_id: &str, coordinate: Coordinate) -> Result<AttackResult> {
        let shared = self.find_battle(battle_id)?;
        let mut battle = shared.lock().unwrap();
        let result = battle.attack(coordinate).map_err(|err| {
            warn!(id = %battle.id(), %coordinate, "rejected attack: {}", err.reason());
            err
        })?;
        info!(
            id = %battle.id(),
            %coordinate,
            outcome = ?result.attacked_cell_status,
            "cell attacked"
        );
        if result.all_ships_sunk {
            info!(id = %battle.id(), "game over, all ships have been sunk");
        }
        Ok(result)
    }

    /// Parse the identity string and look the battle up in the directory.
    fn find_battle(&self, battle_id: &str) -> Result<SharedBattle> {
        let id: BattleId = battle_id.parse()?;
        self.directory
            .find(&id)
            .ok_or(Error::BattleNotFound { id })
    }
}
