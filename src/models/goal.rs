//! Chronological goal log entries.

use serde::{Deserialize, Serialize};

use super::{PlayerId, ShotType};

/// One entry in a match's chronological goal log.
///
/// Present only on matches created after chronological tracking shipped;
/// older matches have no log at all, which selects the legacy timeline
/// reconstruction path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub player_id: PlayerId,
    pub player_name: String,
    pub shot_type: ShotType,

    /// ISO-8601 timestamp of the goal.
    pub timestamp: String,

    /// True when scored by our team, false for an opponent goal.
    pub is_own: bool,
}

/// A conceded goal on a legacy match without a chronological log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentGoal {
    #[serde(rename = "type")]
    pub shot_type: ShotType,

    /// ISO-8601 timestamp of the goal.
    pub time: String,

    /// Name of the defender who conceded.
    pub conceded_by: String,
}
