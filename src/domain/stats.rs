//! Aggregate performance statistics
//!
//! Pure, cache-independent derivation of summary statistics from already
//! extracted data. Deterministic for a given input order: the input list's
//! native ordering (most recent match first) doubles as the tie-breaker for
//! every ranking produced here.

use serde::{Deserialize, Serialize};

use super::match_record::{Award, MatchOutcome, MatchRecord};
use super::player::PlayerProfile;

/// Default analysis window, in matches.
pub const DEFAULT_WINDOW: usize = 20;

/// Summary statistics over a window of recent matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of matches actually considered (≤ requested window size).
    pub window: usize,
    /// Win percentage over the window, rounded. Absent for an empty window.
    pub win_rate: Option<u32>,
    /// Mean performance score over records that carry one, one decimal.
    /// Absent when no record in the window has a score.
    pub average_op_score: Option<f64>,
    /// MVP awards in the window.
    pub mvp_count: usize,
    /// ACE awards in the window.
    pub ace_count: usize,
    /// Top 3 most-played champions with play counts, ties broken by first
    /// occurrence in the input list.
    pub most_played: Vec<(String, usize)>,
    /// Top 3 matches by performance score, ties broken by input order.
    pub best_performances: Vec<MatchRecord>,
    /// Profile the statistics were derived alongside.
    pub profile: PlayerProfile,
}

/// Derive summary statistics from a match list and a profile.
///
/// The window is the first `window_size` entries of `matches` in input
/// order; no re-sorting is applied before windowing.
pub fn aggregate(
    matches: &[MatchRecord],
    profile: &PlayerProfile,
    window_size: usize,
) -> AggregateStats {
    let window = &matches[..window_size.min(matches.len())];

    let win_rate = if window.is_empty() {
        None
    } else {
        let wins = window
            .iter()
            .filter(|m| m.outcome == Some(MatchOutcome::Win))
            .count();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(((wins as f64 / window.len() as f64) * 100.0).round() as u32)
    };

    let scores: Vec<f64> = window.iter().filter_map(|m| m.op_score).collect();
    let average_op_score = if scores.is_empty() {
        None
    } else {
        Some(round_one_decimal(
            scores.iter().sum::<f64>() / scores.len() as f64,
        ))
    };

    let mvp_count = window.iter().filter(|m| m.award == Some(Award::Mvp)).count();
    let ace_count = window.iter().filter(|m| m.award == Some(Award::Ace)).count();

    AggregateStats {
        window: window.len(),
        win_rate,
        average_op_score,
        mvp_count,
        ace_count,
        most_played: most_played_champions(window),
        best_performances: best_performances(window),
        profile: profile.clone(),
    }
}

/// Group by champion name and rank by descending play count. The grouping
/// list is built in first-occurrence order and the sort is stable, so ties
/// keep that order.
fn most_played_champions(window: &[MatchRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in window {
        match counts.iter_mut().find(|(name, _)| *name == record.champion) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.champion.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(3);
    counts
}

/// Records carrying a score, best first; stable sort keeps input order on
/// equal scores.
fn best_performances(window: &[MatchRecord]) -> Vec<MatchRecord> {
    let mut scored: Vec<MatchRecord> = window
        .iter()
        .filter(|m| m.op_score.is_some())
        .cloned()
        .collect();
    scored.sort_by(|a, b| {
        b.op_score
            .unwrap_or(f64::MIN)
            .total_cmp(&a.op_score.unwrap_or(f64::MIN))
    });
    scored.truncate(3);
    scored
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(champion: &str) -> MatchRecord {
        MatchRecord {
            champion: champion.to_string(),
            ..MatchRecord::default()
        }
    }

    fn scored_record(champion: &str, score: f64) -> MatchRecord {
        MatchRecord {
            op_score: Some(score),
            ..record(champion)
        }
    }

    #[test]
    fn empty_window_has_absent_win_rate_and_score() {
        let profile = PlayerProfile::default();
        let stats = aggregate(&[], &profile, 20);
        assert_eq!(stats.window, 0);
        assert_eq!(stats.win_rate, None);
        assert_eq!(stats.average_op_score, None);
        assert!(stats.most_played.is_empty());
    }

    #[test]
    fn win_rate_rounds_over_actual_window() {
        let mut matches = vec![record("Ahri"), record("Ahri"), record("Ahri")];
        matches[0].outcome = Some(MatchOutcome::Win);
        matches[1].outcome = Some(MatchOutcome::Loss);
        // no marker on the third: counts toward the window, not the wins
        let stats = aggregate(&matches, &PlayerProfile::default(), 20);
        assert_eq!(stats.window, 3);
        assert_eq!(stats.win_rate, Some(33));
    }

    #[test]
    fn most_played_ranking_is_stable() {
        let matches: Vec<MatchRecord> = ["A", "B", "A", "C", "B", "A"]
            .iter()
            .map(|c| record(c))
            .collect();
        let stats = aggregate(&matches, &PlayerProfile::default(), 20);
        assert_eq!(
            stats.most_played,
            vec![
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn most_played_breaks_ties_by_first_occurrence() {
        let matches: Vec<MatchRecord> =
            ["B", "A", "B", "A"].iter().map(|c| record(c)).collect();
        let stats = aggregate(&matches, &PlayerProfile::default(), 20);
        assert_eq!(
            stats.most_played,
            vec![("B".to_string(), 2), ("A".to_string(), 2)]
        );
    }

    #[test]
    fn best_performances_sorted_descending_and_truncated() {
        let matches = vec![
            scored_record("A", 6.1),
            record("B"),
            scored_record("C", 9.8),
            scored_record("D", 7.0),
            scored_record("E", 8.2),
        ];
        let stats = aggregate(&matches, &PlayerProfile::default(), 20);
        let names: Vec<&str> = stats
            .best_performances
            .iter()
            .map(|m| m.champion.as_str())
            .collect();
        assert_eq!(names, vec!["C", "E", "D"]);
    }

    #[test]
    fn average_score_is_one_decimal_over_present_scores_only() {
        let matches = vec![
            scored_record("A", 7.25),
            record("B"),
            scored_record("C", 8.0),
        ];
        let stats = aggregate(&matches, &PlayerProfile::default(), 20);
        assert_eq!(stats.average_op_score, Some(7.6));
    }

    #[test]
    fn window_size_truncates_input() {
        let matches: Vec<MatchRecord> = (0..10)
            .map(|i| {
                let mut m = record("A");
                m.outcome = Some(if i < 5 {
                    MatchOutcome::Win
                } else {
                    MatchOutcome::Loss
                });
                m
            })
            .collect();
        let stats = aggregate(&matches, &PlayerProfile::default(), 5);
        assert_eq!(stats.window, 5);
        assert_eq!(stats.win_rate, Some(100));
    }
}
