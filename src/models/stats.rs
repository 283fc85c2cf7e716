//! Derived statistics models.
//!
//! Everything here is computed from the match collection on demand and has
//! no lifecycle of its own; the types are serializable so snapshots can be
//! written to the derived-data directory.

use serde::{Deserialize, Serialize};

use super::{PlayerId, ShotType};

/// Result of a single match from our team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "V")]
    Loss,
}

impl MatchResult {
    /// Classify a final score. Exactly one variant applies.
    pub fn from_scores(score: u32, opponent_score: u32) -> Self {
        if score > opponent_score {
            MatchResult::Win
        } else if score == opponent_score {
            MatchResult::Draw
        } else {
            MatchResult::Loss
        }
    }

    /// Single-letter form code (V is the loss code in the original app).
    pub fn code(&self) -> &'static str {
        match self {
            MatchResult::Win => "W",
            MatchResult::Draw => "D",
            MatchResult::Loss => "V",
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Season totals for a team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonSummary {
    /// Finished matches counted
    pub matches: u32,

    pub wins: u32,
    pub draws: u32,
    pub losses: u32,

    pub goals_for: u32,
    pub goals_against: u32,

    /// goals_for - goals_against (signed)
    pub goal_difference: i64,

    /// Attempts across every player and shot type
    pub total_attempts: u32,

    /// round(goals_for / total_attempts * 100), 0 without attempts
    pub shot_percentage: u32,
}

/// Head-to-head record against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentRecord {
    /// Opponent name exactly as stored (grouping is case-sensitive)
    pub opponent: String,

    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,

    /// round(wins / played * 100)
    pub win_percentage: u32,
}

/// Per-calendar-month aggregates, UTC year-month of the match date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendBucket {
    pub year: i32,

    /// 1-based month
    pub month: u32,

    /// Short lowercase label, e.g. "jan '24"
    pub label: String,

    pub matches: u32,
    pub wins: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

/// One player's season totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonStat {
    pub player_id: PlayerId,
    pub name: String,

    pub goals: u32,
    pub attempts: u32,

    /// Matches the player appeared in
    pub matches: u32,

    pub percentage: u32,

    /// Goals per match, one decimal
    pub goals_per_match: f64,
}

/// Cumulative totals for one shot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTypeTotals {
    pub shot_type: ShotType,
    pub label: String,
    pub goals: u32,
    pub attempts: u32,
    pub percentage: u32,
}

/// One player's career totals with per-shot-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCareerStat {
    pub player_id: PlayerId,
    pub name: String,

    pub goals: u32,
    pub attempts: u32,
    pub matches: u32,
    pub percentage: u32,
    pub goals_per_match: f64,

    /// All 7 shot types in canonical order
    pub by_type: Vec<ShotTypeTotals>,

    /// Shot type with the most career goals; canonical order breaks ties;
    /// `None` when the player never scored
    pub best_shot_type: Option<ShotType>,
}

/// One entry of the recent-form sequence, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormEntry {
    pub match_id: super::MatchId,
    pub opponent: String,
    pub score: u32,
    pub opponent_score: u32,
    pub date: String,
    pub result: MatchResult,
}

/// Direction of a shot type's recent success rate against the season rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Goals/attempts/percentage over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowTotals {
    pub goals: u32,
    pub attempts: u32,
    pub pct: u32,
}

/// Season-vs-recent comparison for one shot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTypeTrend {
    pub shot_type: ShotType,
    pub label: String,
    pub season: WindowTotals,
    pub recent: WindowTotals,

    /// recent.pct - season.pct (signed percentage points)
    pub diff: i64,

    pub trend: Trend,
}

/// Shot-type trend report over the most recent matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTypeTrendReport {
    /// min(requested window, finished match count)
    pub used_matches: u32,

    /// All 7 shot types in canonical order
    pub entries: Vec<ShotTypeTrend>,
}

/// Top scorer over the trailing 30-day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOfMonth {
    pub player_id: PlayerId,
    pub name: String,
    pub goals: u32,
}

/// One reconstructed goal event of a match timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Display name of the scoring side
    pub team: String,

    /// Scorer, or the conceding defender for legacy opponent goals
    pub player: String,

    pub shot_type_label: String,

    /// True when our team scored
    pub is_own: bool,

    /// Absent for own-team events replayed from legacy counters
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_classification() {
        assert_eq!(MatchResult::from_scores(18, 15), MatchResult::Win);
        assert_eq!(MatchResult::from_scores(12, 12), MatchResult::Draw);
        assert_eq!(MatchResult::from_scores(9, 21), MatchResult::Loss);
    }

    #[test]
    fn test_match_result_codes() {
        assert_eq!(MatchResult::Win.code(), "W");
        assert_eq!(MatchResult::Draw.code(), "D");
        assert_eq!(MatchResult::Loss.code(), "V");
    }

    #[test]
    fn test_match_result_serializes_as_code() {
        assert_eq!(serde_json::to_string(&MatchResult::Loss).unwrap(), "\"V\"");
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Trend::Stable).unwrap(), "\"stable\"");
    }

    #[test]
    fn test_team_season_summary_default_is_all_zero() {
        let summary = TeamSeasonSummary::default();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.goal_difference, 0);
        assert_eq!(summary.shot_percentage, 0);
    }

    #[test]
    fn test_summary_serialization_round_trip() {
        let summary = TeamSeasonSummary {
            matches: 3,
            wins: 2,
            draws: 0,
            losses: 1,
            goals_for: 51,
            goals_against: 44,
            goal_difference: 7,
            total_attempts: 130,
            shot_percentage: 39,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: TeamSeasonSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
