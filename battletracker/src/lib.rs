//! Server-side state tracker for Battleship-style games.
//!
//! The crate is organized around a single aggregate, the [`Battle`]: a square
//! grid of cells, the ships placed on it, and a forward-only lifecycle status.
//! A battle is created with a fixed configuration (grid dimension, number of
//! ships, ship length), ships are placed one at a time until the configured
//! count is reached, and then attacks are resolved against coordinates until
//! every ship is sunk.
//!
//! All operations are synchronous, in-memory mutations; nothing here suspends
//! or performs I/O. Multi-threaded callers share battles through the
//! [`BattleDirectory`], which hands out each battle behind its own mutex so at
//! most one placement-or-attack runs per battle at a time while separate
//! battles proceed independently.
//!
//! [`Battle`]: battle::Battle
//! [`BattleDirectory`]: directory::BattleDirectory

pub mod battle;
pub mod directory;
pub mod service;
