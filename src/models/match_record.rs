//! Match record model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, Goal, MatchId, MatchPlayer, OpponentGoal, TeamId};

fn default_finished() -> bool {
    // Write-time rule of the original app: an absent flag means the match
    // was persisted as completed.
    true
}

/// A persisted match.
///
/// Finished matches are immutable for aggregation purposes; only they enter
/// season and career statistics. `goals` is the chronological log of newer
/// matches and is absent on legacy records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier (derived from team, opponent and date)
    pub id: MatchId,

    /// Team this match belongs to
    pub team_id: TeamId,

    /// Team display name at the time of the match
    pub team_name: String,

    /// Opponent display name
    pub opponent: String,

    /// ISO-8601 date of the match
    pub date: String,

    /// Players who participated
    #[serde(default)]
    pub players: Vec<MatchPlayer>,

    /// Our final score
    pub score: u32,

    /// Opponent final score
    pub opponent_score: u32,

    /// Conceded goals (legacy matches only; newer matches log everything
    /// in `goals`)
    #[serde(default)]
    pub opponent_goals: Vec<OpponentGoal>,

    /// Chronological goal log; `None` on legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,

    #[serde(default = "default_finished")]
    pub finished: bool,

    /// Whether the match may be viewed through a share link
    #[serde(default)]
    pub shareable: bool,

    /// Token backing the share link, minted when sharing is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
}

impl Match {
    /// Create a new finished Match with auto-generated ID.
    pub fn new(
        team_id: TeamId,
        team_name: String,
        opponent: String,
        date: String,
        score: u32,
        opponent_score: u32,
    ) -> Self {
        let id = EntityId::generate(&[team_id.as_str(), &opponent, &date]);

        Self {
            id,
            team_id,
            team_name,
            opponent,
            date,
            players: Vec::new(),
            score,
            opponent_score,
            opponent_goals: Vec::new(),
            goals: None,
            finished: true,
            shareable: false,
            share_token: None,
        }
    }

    /// Builder method to set the participating players.
    pub fn with_players(mut self, players: Vec<MatchPlayer>) -> Self {
        self.players = players;
        self
    }

    /// Builder method to set the chronological goal log.
    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.goals = Some(goals);
        self
    }

    /// Builder method to set legacy conceded goals.
    pub fn with_opponent_goals(mut self, goals: Vec<OpponentGoal>) -> Self {
        self.opponent_goals = goals;
        self
    }

    /// Builder method to mark the match unfinished (work in progress).
    pub fn unfinished(mut self) -> Self {
        self.finished = false;
        self
    }

    /// Enable sharing, minting a token if none exists yet.
    pub fn enable_sharing(&mut self) -> &str {
        self.shareable = true;
        if self.share_token.is_none() {
            self.share_token = Some(Uuid::new_v4().to_string());
        }
        self.share_token.as_deref().unwrap_or_default()
    }

    /// Disable sharing. The token is kept so re-enabling restores old links.
    pub fn disable_sharing(&mut self) {
        self.shareable = false;
    }
}
