//! Cross-cutting folds over a team's finished matches.
//!
//! Everything operates on a match list already scoped to one team.
//! Unfinished matches are skipped so a live match in progress never leaks
//! into season or career numbers.

use chrono::Datelike;

use crate::models::{
    Match, MatchResult, MonthlyTrendBucket, OpponentRecord, PlayerCareerStat, PlayerId,
    PlayerSeasonStat, ShotStat, ShotType, ShotTypeTotals, TeamSeasonSummary,
};

use super::{goals_per_match, parse_iso_date, percentage, OrderedGroups};

/// Fold a season of matches into team totals.
pub fn season_summary(matches: &[Match]) -> TeamSeasonSummary {
    let mut summary = TeamSeasonSummary::default();

    for m in matches.iter().filter(|m| m.finished) {
        summary.matches += 1;
        summary.goals_for += m.score;
        summary.goals_against += m.opponent_score;

        match MatchResult::from_scores(m.score, m.opponent_score) {
            MatchResult::Win => summary.wins += 1,
            MatchResult::Draw => summary.draws += 1,
            MatchResult::Loss => summary.losses += 1,
        }

        for player in &m.players {
            summary.total_attempts += player.total_attempts();
        }
    }

    summary.goal_difference = summary.goals_for as i64 - summary.goals_against as i64;
    summary.shot_percentage = percentage(summary.goals_for, summary.total_attempts);
    summary
}

/// Head-to-head records grouped by exact opponent name, first-seen order.
///
/// Grouping is case-sensitive; "KV Ajax" and "kv ajax" are different
/// opponents as far as the records are concerned.
pub fn opponent_records(matches: &[Match]) -> Vec<OpponentRecord> {
    let mut groups: OrderedGroups<OpponentRecord> = OrderedGroups::new();

    for m in matches.iter().filter(|m| m.finished) {
        let record = groups.entry(&m.opponent, || OpponentRecord {
            opponent: m.opponent.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            win_percentage: 0,
        });

        record.played += 1;
        record.goals_for += m.score;
        record.goals_against += m.opponent_score;
        match MatchResult::from_scores(m.score, m.opponent_score) {
            MatchResult::Win => record.wins += 1,
            MatchResult::Draw => record.draws += 1,
            MatchResult::Loss => record.losses += 1,
        }
    }

    let mut records = groups.into_vec();
    for record in &mut records {
        record.win_percentage = percentage(record.wins, record.played);
    }
    records
}

const MONTHS_SHORT: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_label(year: i32, month: u32) -> String {
    format!("{} '{:02}", MONTHS_SHORT[(month - 1) as usize], year.rem_euclid(100))
}

/// Per-month aggregates, ascending by UTC year-month.
///
/// Matches whose date cannot be parsed have no year-month and are skipped.
pub fn monthly_trends(matches: &[Match]) -> Vec<MonthlyTrendBucket> {
    let mut groups: OrderedGroups<MonthlyTrendBucket> = OrderedGroups::new();

    for m in matches.iter().filter(|m| m.finished) {
        let Some(date) = parse_iso_date(&m.date) else {
            continue;
        };
        let (year, month) = (date.year(), date.month());
        let key = format!("{:04}-{:02}", year, month);

        let bucket = groups.entry(&key, || MonthlyTrendBucket {
            year,
            month,
            label: month_label(year, month),
            matches: 0,
            wins: 0,
            goals_for: 0,
            goals_against: 0,
        });

        bucket.matches += 1;
        bucket.goals_for += m.score;
        bucket.goals_against += m.opponent_score;
        if MatchResult::from_scores(m.score, m.opponent_score) == MatchResult::Win {
            bucket.wins += 1;
        }
    }

    let mut buckets = groups.into_vec();
    buckets.sort_by_key(|b| (b.year, b.month));
    buckets
}

/// Running totals for one player across matches.
struct PlayerTotals {
    id: PlayerId,
    name: String,
    goals: u32,
    attempts: u32,
    matches: u32,
    by_type: [ShotStat; 7],
}

/// Group per-player counters by normalized player id, first-seen order.
/// The display name follows the latest occurrence so renames show through.
fn fold_player_totals(matches: &[Match]) -> Vec<PlayerTotals> {
    let mut groups: OrderedGroups<PlayerTotals> = OrderedGroups::new();

    for m in matches.iter().filter(|m| m.finished) {
        for player in &m.players {
            let totals = groups.entry(player.id.as_str(), || PlayerTotals {
                id: player.id.clone(),
                name: player.name.clone(),
                goals: 0,
                attempts: 0,
                matches: 0,
                by_type: [ShotStat::default(); 7],
            });

            totals.name = player.name.clone();
            totals.matches += 1;
            for (i, &shot_type) in ShotType::ALL.iter().enumerate() {
                let stat = player.stat(shot_type);
                totals.by_type[i].accumulate(stat);
                totals.goals += stat.goals;
                totals.attempts += stat.attempts;
            }
        }
    }

    groups.into_vec()
}

/// Per-player season totals in first-appearance order.
pub fn player_season_stats(matches: &[Match]) -> Vec<PlayerSeasonStat> {
    fold_player_totals(matches)
        .into_iter()
        .map(|t| PlayerSeasonStat {
            percentage: percentage(t.goals, t.attempts),
            goals_per_match: goals_per_match(t.goals, t.matches),
            player_id: t.id,
            name: t.name,
            goals: t.goals,
            attempts: t.attempts,
            matches: t.matches,
        })
        .collect()
}

/// Per-player career totals with the per-shot-type breakdown.
pub fn player_career_stats(matches: &[Match]) -> Vec<PlayerCareerStat> {
    fold_player_totals(matches)
        .into_iter()
        .map(|t| {
            let by_type: Vec<ShotTypeTotals> = ShotType::ALL
                .iter()
                .zip(t.by_type.iter())
                .map(|(&shot_type, stat)| ShotTypeTotals {
                    shot_type,
                    label: shot_type.label().to_string(),
                    goals: stat.goals,
                    attempts: stat.attempts,
                    percentage: stat.percentage(),
                })
                .collect();

            let best_shot_type = best_shot_type(&t.by_type);

            PlayerCareerStat {
                percentage: percentage(t.goals, t.attempts),
                goals_per_match: goals_per_match(t.goals, t.matches),
                player_id: t.id,
                name: t.name,
                goals: t.goals,
                attempts: t.attempts,
                matches: t.matches,
                by_type,
                best_shot_type,
            }
        })
        .collect()
}

/// Shot type with the most goals; earlier canonical order wins ties; `None`
/// without any goal.
fn best_shot_type(by_type: &[ShotStat; 7]) -> Option<ShotType> {
    let mut best: Option<(ShotType, u32)> = None;
    for (&shot_type, stat) in ShotType::ALL.iter().zip(by_type.iter()) {
        if stat.goals == 0 {
            continue;
        }
        match best {
            Some((_, goals)) if goals >= stat.goals => {}
            _ => best = Some((shot_type, stat.goals)),
        }
    }
    best.map(|(shot_type, _)| shot_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchPlayer, TeamId};
    use pretty_assertions::assert_eq;

    fn match_vs(opponent: &str, date: &str, score: u32, opponent_score: u32) -> Match {
        Match::new(
            TeamId::from("t1"),
            "KV Blauw-Wit".to_string(),
            opponent.to_string(),
            date.to_string(),
            score,
            opponent_score,
        )
    }

    #[test]
    fn test_zero_matches_all_zero() {
        let summary = season_summary(&[]);
        assert_eq!(summary, TeamSeasonSummary::default());
        assert!(opponent_records(&[]).is_empty());
        assert!(monthly_trends(&[]).is_empty());
        assert!(player_season_stats(&[]).is_empty());
        assert!(player_career_stats(&[]).is_empty());
    }

    #[test]
    fn test_win_draw_loss_exclusive_and_exhaustive() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15),
            match_vs("B", "2024-01-13", 12, 12),
            match_vs("C", "2024-01-20", 9, 21),
            match_vs("D", "2024-01-27", 20, 19),
        ];
        let summary = season_summary(&matches);
        assert_eq!(summary.wins + summary.draws + summary.losses, summary.matches);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.losses, 1);
    }

    #[test]
    fn test_season_summary_totals() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15).with_players(vec![
                MatchPlayer::new("p1", "Anne")
                    .with_stat(ShotType::Distance, 6, 20)
                    .with_stat(ShotType::Penalty, 2, 2),
                MatchPlayer::new("p2", "Bram").with_stat(ShotType::Close, 10, 25),
            ]),
            match_vs("B", "2024-01-13", 10, 12)
                .with_players(vec![
                    MatchPlayer::new("p1", "Anne").with_stat(ShotType::Runthrough, 10, 23)
                ]),
        ];

        let summary = season_summary(&matches);
        assert_eq!(summary.matches, 2);
        assert_eq!(summary.goals_for, 28);
        assert_eq!(summary.goals_against, 27);
        assert_eq!(summary.goal_difference, 1);
        assert_eq!(summary.total_attempts, 70);
        assert_eq!(summary.shot_percentage, 40);
    }

    #[test]
    fn test_goal_difference_can_be_negative() {
        let summary = season_summary(&[match_vs("A", "2024-01-06", 9, 21)]);
        assert_eq!(summary.goal_difference, -12);
    }

    #[test]
    fn test_unfinished_matches_excluded() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15),
            match_vs("B", "2024-01-13", 30, 0).unfinished(),
        ];
        let summary = season_summary(&matches);
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.goals_for, 18);
    }

    #[test]
    fn test_empty_players_still_counts_for_team_totals() {
        let matches = vec![match_vs("A", "2024-01-06", 18, 15)];
        let summary = season_summary(&matches);
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.total_attempts, 0);
        assert_eq!(summary.shot_percentage, 0);
        assert!(player_season_stats(&matches).is_empty());
    }

    #[test]
    fn test_opponent_records_grouped_case_sensitive() {
        let matches = vec![
            match_vs("KV Ajax", "2024-01-06", 18, 15),
            match_vs("kv ajax", "2024-01-13", 12, 12),
            match_vs("KV Ajax", "2024-01-20", 9, 21),
        ];
        let records = opponent_records(&matches);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].opponent, "KV Ajax");
        assert_eq!(records[0].played, 2);
        assert_eq!(records[0].wins, 1);
        assert_eq!(records[0].losses, 1);
        assert_eq!(records[0].win_percentage, 50);

        assert_eq!(records[1].opponent, "kv ajax");
        assert_eq!(records[1].draws, 1);
        assert_eq!(records[1].win_percentage, 0);
    }

    #[test]
    fn test_monthly_trends_ascending_with_labels() {
        let matches = vec![
            match_vs("A", "2024-02-03", 15, 10),
            match_vs("B", "2024-01-06", 18, 15),
            match_vs("C", "2024-01-20", 9, 21),
            match_vs("D", "2023-12-09", 12, 12),
        ];
        let buckets = monthly_trends(&matches);
        assert_eq!(buckets.len(), 3);

        assert_eq!(buckets[0].label, "dec '23");
        assert_eq!(buckets[1].label, "jan '24");
        assert_eq!(buckets[2].label, "feb '24");

        assert_eq!(buckets[1].matches, 2);
        assert_eq!(buckets[1].wins, 1);
        assert_eq!(buckets[1].goals_for, 27);
        assert_eq!(buckets[1].goals_against, 36);
    }

    #[test]
    fn test_monthly_trends_skip_unparseable_dates() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15),
            match_vs("B", "someday", 12, 12),
        ];
        let buckets = monthly_trends(&matches);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].matches, 1);
    }

    #[test]
    fn test_player_season_stats_accumulate_across_matches() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15).with_players(vec![
                MatchPlayer::new("p1", "Anne")
                    .with_stat(ShotType::Distance, 3, 8)
                    .with_stat(ShotType::Close, 2, 4),
            ]),
            match_vs("B", "2024-01-13", 10, 12).with_players(vec![
                MatchPlayer::new("p1", "Anne").with_stat(ShotType::Distance, 2, 5)
            ]),
        ];

        let stats = player_season_stats(&matches);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].goals, 7);
        assert_eq!(stats[0].attempts, 17);
        assert_eq!(stats[0].matches, 2);
        assert_eq!(stats[0].percentage, 41);
        assert_eq!(stats[0].goals_per_match, 3.5);
    }

    #[test]
    fn test_player_stats_first_seen_order_latest_name() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15).with_players(vec![
                MatchPlayer::new("p2", "Bram").with_stat(ShotType::Close, 1, 2),
                MatchPlayer::new("p1", "Anne").with_stat(ShotType::Close, 1, 2),
            ]),
            match_vs("B", "2024-01-13", 10, 12).with_players(vec![
                MatchPlayer::new("p1", "Anne-Fleur").with_stat(ShotType::Close, 1, 2)
            ]),
        ];

        let stats = player_season_stats(&matches);
        assert_eq!(stats[0].player_id.as_str(), "p2");
        assert_eq!(stats[1].player_id.as_str(), "p1");
        assert_eq!(stats[1].name, "Anne-Fleur");
    }

    #[test]
    fn test_career_stats_by_type_breakdown() {
        let matches = vec![match_vs("A", "2024-01-06", 18, 15).with_players(vec![
            MatchPlayer::new("p1", "Anne")
                .with_stat(ShotType::Distance, 3, 9)
                .with_stat(ShotType::Penalty, 1, 1),
        ])];

        let stats = player_career_stats(&matches);
        assert_eq!(stats.len(), 1);
        let career = &stats[0];

        assert_eq!(career.by_type.len(), 7);
        assert_eq!(career.by_type[0].shot_type, ShotType::Distance);
        assert_eq!(career.by_type[0].goals, 3);
        assert_eq!(career.by_type[0].percentage, 33);
        assert_eq!(career.by_type[2].shot_type, ShotType::Penalty);
        assert_eq!(career.by_type[2].percentage, 100);
        // Untouched types are present as zeroes
        assert_eq!(career.by_type[5].shot_type, ShotType::Outstart);
        assert_eq!(career.by_type[5].attempts, 0);

        assert_eq!(career.best_shot_type, Some(ShotType::Distance));
    }

    #[test]
    fn test_best_shot_type_tie_breaks_on_canonical_order() {
        let matches = vec![match_vs("A", "2024-01-06", 18, 15).with_players(vec![
            MatchPlayer::new("p1", "Anne")
                .with_stat(ShotType::Runthrough, 2, 4)
                .with_stat(ShotType::Close, 2, 6),
        ])];
        let stats = player_career_stats(&matches);
        // Close comes before Runthrough in the canonical ordering
        assert_eq!(stats[0].best_shot_type, Some(ShotType::Close));
    }

    #[test]
    fn test_best_shot_type_none_without_goals() {
        let matches = vec![match_vs("A", "2024-01-06", 0, 15).with_players(vec![
            MatchPlayer::new("p1", "Anne").with_stat(ShotType::Distance, 0, 7),
        ])];
        let stats = player_career_stats(&matches);
        assert_eq!(stats[0].best_shot_type, None);
    }

    #[test]
    fn test_missing_outstart_identical_to_explicit_zero() {
        let with_key = vec![match_vs("A", "2024-01-06", 18, 15).with_players(vec![
            MatchPlayer::new("p1", "Anne")
                .with_stat(ShotType::Distance, 3, 8)
                .with_stat(ShotType::Outstart, 0, 0),
        ])];
        let without_key = vec![match_vs("A", "2024-01-06", 18, 15).with_players(vec![
            MatchPlayer::new("p1", "Anne").with_stat(ShotType::Distance, 3, 8),
        ])];

        let a = serde_json::to_string(&player_career_stats(&with_key)).unwrap();
        let b = serde_json::to_string(&player_career_stats(&without_key)).unwrap();
        assert_eq!(a, b);
    }
}
