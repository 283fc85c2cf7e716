//! Team model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Player, TeamId};

/// A team with its roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier (derived from name + creation time)
    pub id: TeamId,

    /// Team name
    pub name: String,

    /// Roster; duplicate names allowed, identity is the player id
    #[serde(default)]
    pub players: Vec<Player>,

    /// When this team was created
    pub created_at: DateTime<Utc>,

    /// Short code used by the join-team flow
    pub invite_code: String,
}

impl Team {
    /// Create a new Team with auto-generated ID and invite code.
    pub fn new(name: String, created_at: DateTime<Utc>) -> Self {
        let id = EntityId::generate(&[&name, &created_at.to_rfc3339()]);
        let invite_code = Self::invite_code_for(&id);

        Self {
            id,
            name,
            players: Vec::new(),
            created_at,
            invite_code,
        }
    }

    /// Builder method to set the roster.
    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    /// Deterministic 6-character invite code derived from the team id.
    fn invite_code_for(id: &TeamId) -> String {
        id.as_str().chars().take(6).collect::<String>().to_uppercase()
    }
}
