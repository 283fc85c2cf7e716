//! Recent form and shot-type recency trends.

use crate::models::{
    FormEntry, Match, MatchResult, ShotStat, ShotType, ShotTypeTrend, ShotTypeTrendReport, Trend,
    WindowTotals,
};

use super::sorted_recent_first;

/// Differences inside this band (percentage points, inclusive) read as
/// stable. Deliberate noise filter: small windows swing several points on a
/// single shot.
const TREND_DEAD_ZONE: i64 = 3;

/// The last `n` finished matches as W/D/V entries, most recent first.
///
/// Fewer than `n` matches returns all of them.
pub fn form_last_n(matches: &[Match], n: usize) -> Vec<FormEntry> {
    sorted_recent_first(matches)
        .into_iter()
        .take(n)
        .map(|m| FormEntry {
            match_id: m.id.clone(),
            opponent: m.opponent.clone(),
            score: m.score,
            opponent_score: m.opponent_score,
            date: m.date.clone(),
            result: MatchResult::from_scores(m.score, m.opponent_score),
        })
        .collect()
}

fn window_totals(matches: &[&Match]) -> [ShotStat; 7] {
    let mut totals = [ShotStat::default(); 7];
    for m in matches {
        for player in &m.players {
            for (i, &shot_type) in ShotType::ALL.iter().enumerate() {
                totals[i].accumulate(player.stat(shot_type));
            }
        }
    }
    totals
}

fn classify(diff: i64) -> Trend {
    if diff > TREND_DEAD_ZONE {
        Trend::Up
    } else if diff < -TREND_DEAD_ZONE {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Compare each shot type's success rate over the most recent `n` matches
/// against the full season.
pub fn shot_type_trend(matches: &[Match], n: usize) -> ShotTypeTrendReport {
    let recent_first = sorted_recent_first(matches);
    let season = window_totals(&recent_first);
    let recent_window: Vec<&Match> = recent_first.iter().take(n).copied().collect();
    let recent = window_totals(&recent_window);

    let entries = ShotType::ALL
        .iter()
        .enumerate()
        .map(|(i, &shot_type)| {
            let season_totals = WindowTotals {
                goals: season[i].goals,
                attempts: season[i].attempts,
                pct: season[i].percentage(),
            };
            let recent_totals = WindowTotals {
                goals: recent[i].goals,
                attempts: recent[i].attempts,
                pct: recent[i].percentage(),
            };
            let diff = recent_totals.pct as i64 - season_totals.pct as i64;

            ShotTypeTrend {
                shot_type,
                label: shot_type.label().to_string(),
                season: season_totals,
                recent: recent_totals,
                diff,
                trend: classify(diff),
            }
        })
        .collect();

    ShotTypeTrendReport {
        used_matches: recent_window.len() as u32,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchPlayer, TeamId};

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

    fn distance_match(date: &str, goals: u32, attempts: u32) -> Match {
        match_vs("A", date, goals, 0).with_players(vec![
            MatchPlayer::new("p1", "Anne").with_stat(ShotType::Distance, goals, attempts),
        ])
    }

    #[test]
    fn test_form_ordering_and_results() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15),
            match_vs("B", "2024-02-03", 12, 12),
            match_vs("C", "2024-01-20", 9, 21),
        ];

        let form = form_last_n(&matches, 5);
        assert_eq!(form.len(), 3);
        assert_eq!(form[0].opponent, "B");
        assert_eq!(form[0].result, MatchResult::Draw);
        assert_eq!(form[1].opponent, "C");
        assert_eq!(form[1].result, MatchResult::Loss);
        assert_eq!(form[2].opponent, "A");
        assert_eq!(form[2].result, MatchResult::Win);
    }

    #[test]
    fn test_form_bounded_to_n() {
        let matches: Vec<Match> = (1..=8)
            .map(|day| match_vs("A", &format!("2024-01-{:02}", day), 10, 8))
            .collect();
        let form = form_last_n(&matches, 5);
        assert_eq!(form.len(), 5);
        assert_eq!(form[0].date, "2024-01-08");
        assert_eq!(form[4].date, "2024-01-04");
    }

    #[test]
    fn test_form_skips_unfinished() {
        let matches = vec![
            match_vs("A", "2024-01-06", 18, 15),
            match_vs("B", "2024-02-03", 4, 2).unfinished(),
        ];
        let form = form_last_n(&matches, 5);
        assert_eq!(form.len(), 1);
        assert_eq!(form[0].opponent, "A");
    }

    #[test]
    fn test_form_empty_input() {
        assert!(form_last_n(&[], 5).is_empty());
    }

    // Two matches of 100 attempts each, old one mirrored so the season sits
    // at exactly 50% while the recent window of one match sits at the
    // tested rate.
    fn trend_for_recent_pct(recent_pct: u32) -> Trend {
        let matches = vec![
            distance_match("2024-01-06", 100 - recent_pct, 100),
            distance_match("2024-01-13", recent_pct, 100),
        ];
        let report = shot_type_trend(&matches, 1);
        let entry = &report.entries[0];
        assert_eq!(entry.season.pct, 50, "season must sit at 50");
        assert_eq!(entry.recent.pct, recent_pct);
        entry.trend
    }

    #[test]
    fn test_trend_dead_zone_boundaries() {
        // recent 53% vs season 50% -> stable (inside the band)
        assert_eq!(trend_for_recent_pct(53), Trend::Stable);
        // recent 54% -> up
        assert_eq!(trend_for_recent_pct(54), Trend::Up);
        // recent 46% -> down
        assert_eq!(trend_for_recent_pct(46), Trend::Down);
        // recent 47% -> stable
        assert_eq!(trend_for_recent_pct(47), Trend::Stable);
    }

    #[test]
    fn test_shot_type_trend_used_matches() {
        let matches = vec![
            distance_match("2024-01-06", 5, 10),
            distance_match("2024-01-13", 5, 10),
        ];
        assert_eq!(shot_type_trend(&matches, 5).used_matches, 2);
        assert_eq!(shot_type_trend(&matches, 1).used_matches, 1);
        assert_eq!(shot_type_trend(&[], 5).used_matches, 0);
    }

    #[test]
    fn test_shot_type_trend_covers_all_types() {
        let report = shot_type_trend(&[], 5);
        assert_eq!(report.entries.len(), 7);
        assert!(report
            .entries
            .iter()
            .all(|e| e.trend == Trend::Stable && e.season.pct == 0));
    }

    #[test]
    fn test_recent_window_takes_most_recent() {
        // Old matches are poor (0%), the latest is perfect (100%)
        let matches = vec![
            distance_match("2024-01-06", 0, 10),
            distance_match("2024-01-13", 0, 10),
            distance_match("2024-01-20", 10, 10),
        ];
        let report = shot_type_trend(&matches, 1);
        let entry = &report.entries[0];
        assert_eq!(entry.recent.pct, 100);
        assert_eq!(entry.season.pct, 33);
        assert_eq!(entry.diff, 67);
        assert_eq!(entry.trend, Trend::Up);
    }
}
