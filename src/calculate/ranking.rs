//! Ordering and selection over aggregated records.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    Match, OpponentRecord, PlayerId, PlayerOfMonth, PlayerSeasonStat, Team, TeamId,
};

use super::{opponent_records, parse_iso_date, player_season_stats, OrderedGroups};

/// Trailing window for player of the month: exactly 30 days, not calendar
/// months.
const PLAYER_OF_MONTH_WINDOW_HOURS: i64 = 30 * 24;

/// Top scorers of the season, at most `limit` entries.
///
/// Sorted descending by goals; equal scorers keep first-appearance order
/// (the sort is stable over the first-seen grouping).
pub fn top_players(matches: &[Match], limit: usize) -> Vec<PlayerSeasonStat> {
    let mut stats = player_season_stats(matches);
    stats.sort_by(|a, b| b.goals.cmp(&a.goals));
    stats.truncate(limit);
    stats
}

/// Opponent records sorted descending by win percentage, stable over the
/// first-seen grouping order.
pub fn opponent_stats(matches: &[Match]) -> Vec<OpponentRecord> {
    let mut records = opponent_records(matches);
    records.sort_by(|a, b| b.win_percentage.cmp(&a.win_percentage));
    records
}

/// Top scorer over the trailing 30-day window ending at `now`.
///
/// Players without a goal in the window are not candidates; ties go to the
/// first player encountered. `None` when nobody qualifies. Matches with
/// unparseable dates never fall inside the window.
pub fn player_of_month(matches: &[Match], now: DateTime<Utc>) -> Option<PlayerOfMonth> {
    let cutoff = now - Duration::hours(PLAYER_OF_MONTH_WINDOW_HOURS);

    let mut groups: OrderedGroups<(PlayerId, String, u32)> = OrderedGroups::new();
    for m in matches.iter().filter(|m| m.finished) {
        let Some(date) = parse_iso_date(&m.date) else {
            continue;
        };
        if date < cutoff {
            continue;
        }
        for player in &m.players {
            let entry = groups.entry(player.id.as_str(), || {
                (player.id.clone(), player.name.clone(), 0)
            });
            entry.1 = player.name.clone();
            entry.2 += player.total_goals();
        }
    }

    let mut best: Option<(PlayerId, String, u32)> = None;
    for (id, name, goals) in groups.into_vec() {
        if goals == 0 {
            continue;
        }
        match &best {
            Some((_, _, best_goals)) if *best_goals >= goals => {}
            _ => best = Some((id, name, goals)),
        }
    }

    best.map(|(player_id, name, goals)| PlayerOfMonth {
        player_id,
        name,
        goals,
    })
}

/// Pick which of a set of duplicate teams the others should merge into.
///
/// Most matches wins; then the larger roster; then the earliest creation
/// time; any remaining tie resolves to the earliest-listed team. The order
/// is total, so the choice is never ambiguous.
pub fn suggest_merge_target<'a>(
    teams: &'a [Team],
    match_counts: &HashMap<TeamId, u32>,
) -> Option<&'a Team> {
    let count = |team: &Team| match_counts.get(&team.id).copied().unwrap_or(0);

    teams.iter().reduce(|current, candidate| {
        let by_rank = count(candidate)
            .cmp(&count(current))
            .then_with(|| candidate.players.len().cmp(&current.players.len()))
            .then_with(|| current.created_at.cmp(&candidate.created_at));
        if by_rank == std::cmp::Ordering::Greater {
            candidate
        } else {
            current
        }
    })
}
