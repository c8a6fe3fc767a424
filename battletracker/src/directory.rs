//! In-memory registry of active battles.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use crate::battle::{Battle, BattleId};

/// Shared handle to a registered battle.
///
/// Each battle sits behind its own mutex: locking it serializes placements
/// and attacks for that battle while leaving every other battle free to
/// proceed. Lock holders must not do anything blocking while holding the
/// lock; all battle operations are plain in-memory mutations.
pub type SharedBattle = Arc<Mutex<Battle>>;

/// Directory of all active battles, keyed by identity.
///
/// Constructed once at process start and shared (via `Arc`) with whatever
/// layer drives the service; there is no hidden global state. Battles live
/// until the process exits.
#[derive(Debug, Default)]
pub struct BattleDirectory {
    battles: RwLock<HashMap<BattleId, SharedBattle>>,
}

impl BattleDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a battle under its own identity, returning the id.
    ///
    /// Battle ids are freshly generated UUIDs, so collisions don't happen in
    /// practice; if one somehow does, the newer battle replaces the older.
    pub fn register(&self, battle: Battle) -> BattleId {
        let id = battle.id();
        let mut battles = self.battles.write().unwrap();
        battles.insert(id, Arc::new(Mutex::new(battle)));
        id
    }

    /// Look up the battle with the given identity.
    pub fn find(&self, id: &BattleId) -> Option<SharedBattle> {
        let battles = self.battles.read().unwrap();
        battles.get(id).cloned()
    }

    /// The number of registered battles.
    pub fn len(&self) -> usize {
        self.battles.read().unwrap().len()
    }

    /// Whether the directory contains no battles.
    pub fn is_empty(&self) -> bool {
        self.battles.read().unwrap().is_empty()
    }

    /// Snapshot of the ids of all registered battles, in no particular order.
    pub fn ids(&self) -> Vec<BattleId> {
        self.battles.read().unwrap().keys().copied().collect()
    }
}
