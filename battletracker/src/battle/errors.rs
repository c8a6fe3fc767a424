//! Errors raised by battle construction, ship placement, and attack
//! resolution.
//!
//! All of these are local validation outcomes, not system faults: a failing
//! operation mutates nothing and the error is surfaced to the caller as-is.

use thiserror::Error;

use crate::battle::Coordinate;

/// Error returned when battle parameters physically cannot produce a valid
/// game: the ship length is zero, or greater than the grid dimension.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error(
    "failed to initiate battle: ships of length {ship_length} cannot be placed on a grid of dimension {dimension}"
)]
pub struct InvalidConfiguration {
    /// The requested grid dimension.
    pub dimension: usize,
    /// The requested ship length that cannot be placed.
    pub ship_length: usize,
}

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The battle has already ended.
    #[error("this battle is over, no more ships can be placed")]
    BattleOver,
    /// The anchor coordinate is outside the grid.
    #[error("the anchor coordinate is out of bounds")]
    OutOfBounds,
    /// The run from the anchor does not fit inside the grid in the requested
    /// orientation.
    #[error("insufficient space for the ship at the specified position")]
    InsufficientSpace,
    /// One or more cells in the run is already occupied by a ship.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
    /// The configured number of ships has already been placed.
    #[error("can't fit more ships")]
    FleetFull,
}

/// Error caused when attempting to place a ship illegally.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place ship at {anchor}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    anchor: Coordinate,
}

impl PlaceError {
    pub(super) fn new(reason: CannotPlaceReason, anchor: Coordinate) -> Self {
        Self { reason, anchor }
    }

    /// Get the reason placement was rejected.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the anchor coordinate where placement was attempted.
    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }
}

/// Reason why an attack could not be resolved.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotAttackReason {
    /// The battle has already ended.
    #[error("this battle is over, can't process attack")]
    BattleOver,
    /// Not all configured ships have been placed yet.
    #[error("all ships must be placed before attacking")]
    FleetIncomplete,
    /// The target coordinate is outside the grid.
    #[error("the attacked coordinate is out of bounds")]
    OutOfBounds,
}

/// Error returned when an attack is rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not attack {coordinate}: {reason}")]
pub struct AttackError {
    #[source]
    reason: CannotAttackReason,
    coordinate: Coordinate,
}

impl AttackError {
    pub(super) fn new(reason: CannotAttackReason, coordinate: Coordinate) -> Self {
        Self { reason, coordinate }
    }

    /// Get the reason the attack was rejected.
    pub fn reason(&self) -> CannotAttackReason {
        self.reason
    }

    /// Get the coordinate the attack targeted.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
