//! Goal-by-goal timeline reconstruction.
//!
//! Newer matches store a chronological goal log and replay directly. Legacy
//! matches only have per-player counters plus a conceded-goal list; their
//! timeline is replayed from the counters with own-team events first and
//! opponent events appended, because the true interleaving was never
//! recorded. The running score is a prefix count over the emitted order
//! either way, which for legacy data is an accepted approximation.

use crate::models::{Goal, Match, MatchPlayer, OpponentGoal, ShotType, TimelineEvent};

/// Which reconstruction path applies to a match, resolved exactly once.
#[derive(Debug)]
pub enum MatchLog<'a> {
    /// The stored order is chronological by construction.
    Chronological(&'a [Goal]),

    /// Counters only; order among own-team goals is not recoverable.
    LegacyAggregate {
        players: &'a [MatchPlayer],
        opponent_goals: &'a [OpponentGoal],
    },
}

impl<'a> MatchLog<'a> {
    /// Resolve the reconstruction path for a match. An empty goal log is
    /// treated the same as an absent one.
    pub fn resolve(m: &'a Match) -> Self {
        match m.goals.as_deref() {
            Some(goals) if !goals.is_empty() => MatchLog::Chronological(goals),
            _ => MatchLog::LegacyAggregate {
                players: &m.players,
                opponent_goals: &m.opponent_goals,
            },
        }
    }
}

/// Reconstruct the ordered goal events of a match.
pub fn timeline_events(m: &Match) -> Vec<TimelineEvent> {
    match MatchLog::resolve(m) {
        MatchLog::Chronological(goals) => goals
            .iter()
            .map(|goal| TimelineEvent {
                team: if goal.is_own {
                    m.team_name.clone()
                } else {
                    m.opponent.clone()
                },
                player: goal.player_name.clone(),
                shot_type_label: goal.shot_type.label().to_string(),
                is_own: goal.is_own,
                timestamp: Some(goal.timestamp.clone()),
            })
            .collect(),

        MatchLog::LegacyAggregate {
            players,
            opponent_goals,
        } => {
            let mut events = Vec::new();
            for player in players {
                for &shot_type in ShotType::ALL.iter() {
                    let goals = player.stat(shot_type).goals;
                    for _ in 0..goals {
                        events.push(TimelineEvent {
                            team: m.team_name.clone(),
                            player: player.name.clone(),
                            shot_type_label: shot_type.label().to_string(),
                            is_own: true,
                            timestamp: None,
                        });
                    }
                }
            }
            for conceded in opponent_goals {
                events.push(TimelineEvent {
                    team: m.opponent.clone(),
                    player: conceded.conceded_by.clone(),
                    shot_type_label: conceded.shot_type.label().to_string(),
                    is_own: false,
                    timestamp: Some(conceded.time.clone()),
                });
            }
            events
        }
    }
}

/// Running score after each event: (own, opponent) prefix counts.
pub fn score_progression(events: &[TimelineEvent]) -> Vec<(u32, u32)> {
    let mut own = 0;
    let mut opponent = 0;
    events
        .iter()
        .map(|event| {
            if event.is_own {
                own += 1;
            } else {
                opponent += 1;
            }
            (own, opponent)
        })
        .collect()
}
