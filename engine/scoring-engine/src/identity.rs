//! Player identity resolution
//!
//! The league API refers to players by numeric id while projections and
//! market values are keyed by display name. Scorers take an injected
//! [`IdentityResolver`] to bridge the two instead of reaching for a global
//! lookup table.

use crate::models::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label used when a player id cannot be resolved
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// What we know about a player beyond their id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub player_id: String,
    /// Full display name (e.g., "Amon-Ra St. Brown")
    pub name: String,
    pub position: Option<Position>,
}

/// Maps league player ids to identities
pub trait IdentityResolver {
    fn resolve(&self, player_id: &str) -> Option<PlayerIdentity>;

    /// Display name, or [`UNKNOWN_PLAYER`]
    fn display_name(&self, player_id: &str) -> String {
        self.resolve(player_id).map(|p| p.name).unwrap_or_else(|| UNKNOWN_PLAYER.to_string())
    }

    /// Display name, or the raw id when unresolved
    fn name_or_id(&self, player_id: &str) -> String {
        self.resolve(player_id).map(|p| p.name).unwrap_or_else(|| player_id.to_string())
    }
}

/// In-memory player directory keyed by id
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    by_id: HashMap<String, PlayerIdentity>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_identities(identities: impl IntoIterator<Item = PlayerIdentity>) -> Self {
        let mut directory = Self::new();
        for identity in identities {
            directory.insert(identity);
        }
        directory
    }

    /// Add or replace a player by id
    pub fn insert(&mut self, identity: PlayerIdentity) {
        self.by_id.insert(identity.player_id.clone(), identity);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl IdentityResolver for PlayerDirectory {
    fn resolve(&self, player_id: &str) -> Option<PlayerIdentity> {
        self.by_id.get(player_id).cloned()
    }
}
