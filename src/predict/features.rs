//! Hand-engineered match-up features.
//!
//! Column order is fixed by the trained model:
//! `[rating_diff, map_diff, rating_level_diff, map_stability_diff]`.
//!
//! `rating_level_diff` cancels down to `rating_diff` once the shared
//! `global_avg_rating` term is subtracted from both sides. The model was fit
//! with the duplicate column, so it stays.

use serde::Serialize;

use super::{PredictError, DEFAULT_WIN_RATE, FEATURE_COUNT};
use crate::data::{TeamStats, TeamTable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    /// team1 rating − team2 rating
    pub rating_diff: f64,
    /// team1 win rate on the map − team2 win rate on the map
    pub map_diff: f64,
    /// (team1 − global) − (team2 − global)
    pub rating_level_diff: f64,
    /// σ(team1 map win rates) − σ(team2 map win rates)
    pub map_stability_diff: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.rating_diff,
            self.map_diff,
            self.rating_level_diff,
            self.map_stability_diff,
        ]
    }
}

/// Mean `avg_rating` across the whole table. Teams without a rating count as
/// zero; an empty table yields zero.
pub fn global_avg_rating(table: &TeamTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let sum: f64 = table.values().map(|t| t.avg_rating.unwrap_or(0.0)).sum();
    sum / table.len() as f64
}

fn map_win_rate(team: &TeamStats, map: &str) -> f64 {
    team.map_win_rate.get(map).copied().unwrap_or(DEFAULT_WIN_RATE)
}

/// Population standard deviation of a team's per-map win rates.
/// A team with no map history is treated as `{0.5}`, i.e. σ = 0.
fn map_stability(team: &TeamStats) -> f64 {
    let rates: Vec<f64> = team.map_win_rate.values().copied().collect();
    if rates.is_empty() {
        return population_std(&[DEFAULT_WIN_RATE]);
    }
    population_std(&rates)
}

fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

/// Build the four-feature vector for `team1` vs `team2` on `map`.
pub fn derive_features(
    team1: &str,
    team2: &str,
    map: &str,
    table: &TeamTable,
) -> Result<FeatureVector, PredictError> {
    let t1 = table
        .get(team1)
        .ok_or_else(|| PredictError::UnknownTeam(team1.to_string()))?;
    let t2 = table
        .get(team2)
        .ok_or_else(|| PredictError::UnknownTeam(team2.to_string()))?;

    let global = global_avg_rating(table);

    let map_diff = map_win_rate(t1, map) - map_win_rate(t2, map);

    let t1_rating = t1.avg_rating.unwrap_or(global);
    let t2_rating = t2.avg_rating.unwrap_or(global);
    let rating_diff = t1_rating - t2_rating;

    let rating_level_diff = (t1_rating - global) - (t2_rating - global);

    let map_stability_diff = map_stability(t1) - map_stability(t2);

    Ok(FeatureVector {
        rating_diff,
        map_diff,
        rating_level_diff,
        map_stability_diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn team(rating: Option<f64>, maps: &[(&str, f64)]) -> TeamStats {
        TeamStats {
            avg_rating: rating,
            map_win_rate: maps
                .iter()
                .map(|(m, r)| (m.to_string(), *r))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn table(entries: Vec<(&str, TeamStats)>) -> TeamTable {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn ascent_scenario() {
        let t = table(vec![
            ("A", team(Some(1.2), &[("Ascent", 0.6)])),
            ("B", team(Some(1.0), &[("Ascent", 0.4)])),
        ]);
        let f = derive_features("A", "B", "Ascent", &t).unwrap();
        assert_relative_eq!(f.rating_diff, 0.2, epsilon = 1e-12);
        assert_relative_eq!(f.map_diff, 0.2, epsilon = 1e-12);
        assert_relative_eq!(f.rating_level_diff, 0.2, epsilon = 1e-12);
        // single-map tables have zero spread
        assert_relative_eq!(f.map_stability_diff, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn unseen_map_defaults_both_sides() {
        let t = table(vec![
            ("A", team(Some(1.1), &[("Bind", 0.9)])),
            ("B", team(Some(0.9), &[("Haven", 0.1)])),
        ]);
        let f = derive_features("A", "B", "Lotus", &t).unwrap();
        assert_relative_eq!(f.map_diff, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn one_side_unseen_map_uses_half() {
        let t = table(vec![
            ("A", team(Some(1.0), &[("Split", 0.8)])),
            ("B", team(Some(1.0), &[])),
        ]);
        let f = derive_features("A", "B", "Split", &t).unwrap();
        assert_relative_eq!(f.map_diff, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn identical_win_rate_gives_zero_map_diff() {
        let t = table(vec![
            ("A", team(Some(1.3), &[("Icebox", 0.55), ("Pearl", 0.2)])),
            ("B", team(Some(0.8), &[("Icebox", 0.55)])),
        ]);
        let f = derive_features("A", "B", "Icebox", &t).unwrap();
        assert_relative_eq!(f.map_diff, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn map_diff_stays_within_unit_range() {
        let rates = [0.0, 0.25, 0.5, 0.75, 1.0];
        for r1 in rates {
            for r2 in rates {
                let t = table(vec![
                    ("A", team(Some(1.0), &[("Bind", r1)])),
                    ("B", team(Some(1.0), &[("Bind", r2)])),
                ]);
                for map in ["Bind", "Breeze"] {
                    let f = derive_features("A", "B", map, &t).unwrap();
                    assert!((-1.0..=1.0).contains(&f.map_diff), "{} vs {}: {}", r1, r2, f.map_diff);
                }
            }
        }
    }

    #[test]
    fn rating_level_diff_matches_rating_diff() {
        let ratings = [None, Some(0.0), Some(0.85), Some(1.0), Some(1.37), Some(2.5)];
        for r1 in ratings {
            for r2 in ratings {
                let t = table(vec![
                    ("A", team(r1, &[])),
                    ("B", team(r2, &[])),
                    ("C", team(Some(1.12), &[])),
                ]);
                let f = derive_features("A", "B", "Ascent", &t).unwrap();
                assert_relative_eq!(f.rating_level_diff, f.rating_diff, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn missing_rating_defaults_to_global_mean() {
        // global = (1.2 + 0 + 0.9) / 3 = 0.7: the unrated team counts as 0 in the
        // mean but is then assigned the mean itself
        let t = table(vec![
            ("A", team(Some(1.2), &[])),
            ("B", team(None, &[])),
            ("C", team(Some(0.9), &[])),
        ]);
        assert_relative_eq!(global_avg_rating(&t), 0.7, epsilon = 1e-12);
        let f = derive_features("A", "B", "Ascent", &t).unwrap();
        assert_relative_eq!(f.rating_diff, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_map_tables_have_zero_stability_diff() {
        let t = table(vec![("A", team(Some(1.0), &[])), ("B", team(Some(1.4), &[]))]);
        let f = derive_features("A", "B", "Sunset", &t).unwrap();
        assert_relative_eq!(f.map_stability_diff, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn stability_uses_population_std() {
        // {0.2, 0.8}: mean 0.5, σ = 0.3 (ddof = 0)
        let t = table(vec![
            ("A", team(Some(1.0), &[("Bind", 0.2), ("Haven", 0.8)])),
            ("B", team(Some(1.0), &[])),
        ]);
        let f = derive_features("A", "B", "Bind", &t).unwrap();
        assert_relative_eq!(f.map_stability_diff, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn unknown_team_is_reported() {
        let t = table(vec![("A", team(Some(1.0), &[]))]);
        assert_eq!(
            derive_features("A", "ZZZ", "Bind", &t),
            Err(PredictError::UnknownTeam("ZZZ".into()))
        );
        assert_eq!(
            derive_features("QQQ", "A", "Bind", &t),
            Err(PredictError::UnknownTeam("QQQ".into()))
        );
    }

    #[test]
    fn empty_table_global_mean_is_zero() {
        assert_eq!(global_avg_rating(&TeamTable::new()), 0.0);
    }

    #[test]
    fn array_order_is_fixed() {
        let f = FeatureVector {
            rating_diff: 1.0,
            map_diff: 2.0,
            rating_level_diff: 3.0,
            map_stability_diff: 4.0,
        };
        assert_eq!(f.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }
}
