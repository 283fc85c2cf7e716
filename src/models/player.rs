//! Roster and per-match player models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{PlayerId, ShotStat, ShotType};

/// A roster entry.
///
/// Identity is the id; names are mutable and not unique, so duplicate names
/// are tolerated everywhere and never deduplicated implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A player's participation in one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub id: PlayerId,
    pub name: String,

    /// Whether the player was in the starting lineup.
    #[serde(default)]
    pub is_starter: bool,

    /// Per-shot-type counters. Freshly created matches carry all 7 keys;
    /// legacy records may lack `outstart`.
    #[serde(default)]
    pub stats: HashMap<ShotType, ShotStat>,
}

impl MatchPlayer {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_starter: false,
            stats: HashMap::new(),
        }
    }

    /// Builder method to mark the player as a starter.
    pub fn as_starter(mut self) -> Self {
        self.is_starter = true;
        self
    }

    /// Builder method to set one shot-type counter.
    pub fn with_stat(mut self, shot_type: ShotType, goals: u32, attempts: u32) -> Self {
        self.stats.insert(shot_type, ShotStat::new(goals, attempts));
        self
    }

    /// Counter for one shot type, substituting zero for missing keys.
    ///
    /// Total by construction: a legacy record without `outstart` reads as
    /// `{goals: 0, attempts: 0}` rather than an absent value.
    pub fn stat(&self, shot_type: ShotType) -> ShotStat {
        self.stats.get(&shot_type).copied().unwrap_or_default()
    }

    /// Goals across all shot types.
    pub fn total_goals(&self) -> u32 {
        ShotType::ALL.iter().map(|&t| self.stat(t).goals).sum()
    }

    /// Attempts across all shot types.
    pub fn total_attempts(&self) -> u32 {
        ShotType::ALL.iter().map(|&t| self.stat(t).attempts).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_missing_key_is_zero() {
        let player = MatchPlayer::new("p1", "Anne").with_stat(ShotType::Distance, 2, 5);
        assert_eq!(player.stat(ShotType::Distance), ShotStat::new(2, 5));
        assert_eq!(player.stat(ShotType::Outstart), ShotStat::default());
    }

    #[test]
    fn test_totals_iterate_all_shot_types() {
        let player = MatchPlayer::new("p1", "Anne")
            .with_stat(ShotType::Distance, 2, 5)
            .with_stat(ShotType::Penalty, 1, 1);
        assert_eq!(player.total_goals(), 3);
        assert_eq!(player.total_attempts(), 6);
    }

    #[test]
    fn test_match_player_deserialize_legacy_stats() {
        // No outstart key, numeric player id
        let json = r#"{
            "id": 7,
            "name": "Bram",
            "is_starter": true,
            "stats": {
                "distance": {"goals": 1, "attempts": 4},
                "close": {"goals": 0, "attempts": 2}
            }
        }"#;
        let player: MatchPlayer = serde_json::from_str(json).unwrap();
        assert_eq!(player.id.as_str(), "7");
        assert!(player.is_starter);
        assert_eq!(player.stat(ShotType::Distance).goals, 1);
        assert_eq!(player.stat(ShotType::Outstart), ShotStat::default());
        assert_eq!(player.total_attempts(), 6);
    }

    #[test]
    fn test_match_player_deserialize_missing_stats() {
        let player: MatchPlayer = serde_json::from_str(r#"{"id": "p1", "name": "Cas"}"#).unwrap();
        assert!(player.stats.is_empty());
        assert_eq!(player.total_goals(), 0);
    }

    #[test]
    fn test_duplicate_names_are_distinct_players() {
        let a = Player::new("p1", "Jan");
        let b = Player::new("p2", "Jan");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }
}
