use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::features::derive_features;
use super::PredictError;
use crate::data::TeamTable;
use crate::model::{Classifier, StandardScaler};

/// Distance from a coin flip beyond which a prediction is labelled confident.
const HIGH_CONFIDENCE_MARGIN: f64 = 0.3;

/// Coarse bucket for how far the probability sits from 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "high confidence")]
    High,
    #[serde(rename = "use with caution")]
    Caution,
}

impl Confidence {
    pub fn from_probability(p: f64) -> Self {
        if (p - 0.5).abs() > HIGH_CONFIDENCE_MARGIN {
            Confidence::High
        } else {
            Confidence::Caution
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high confidence",
            Confidence::Caution => "use with caution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub team1: String,
    pub team2: String,
    pub map: String,
    /// P(team1 wins), rounded to 3 decimals
    pub win_prob: f64,
    pub confidence: Confidence,
}

/// What one predict action yields. A failure carries only the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Success(PredictionResult),
    Failure { error: String },
}

#[cfg(test)]
impl PredictionOutcome {
    pub fn win_prob(&self) -> Option<f64> {
        match self {
            PredictionOutcome::Success(r) => Some(r.win_prob),
            PredictionOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Success(_) => None,
            PredictionOutcome::Failure { error } => Some(error),
        }
    }
}

fn round3(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}

fn score(
    team1: &str,
    team2: &str,
    map: &str,
    model: &dyn Classifier,
    scaler: &StandardScaler,
    table: &TeamTable,
) -> Result<PredictionResult, PredictError> {
    let features = derive_features(team1, team2, map, table)?;
    debug!(team1, team2, map, ?features, "Derived features");

    let scaled = scaler.transform(&features.to_array())?;
    let [_, p] = model.predict_proba(&scaled)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(PredictError::OutOfRange(p));
    }

    Ok(PredictionResult {
        team1: team1.to_string(),
        team2: team2.to_string(),
        map: map.to_string(),
        win_prob: round3(p),
        confidence: Confidence::from_probability(p),
    })
}

/// Score `team1` vs `team2` on `map`.
///
/// Never fails: lookup, scaling and inference errors come back as
/// [`PredictionOutcome::Failure`].
pub fn predict_match(
    team1: &str,
    team2: &str,
    map: &str,
    model: &dyn Classifier,
    scaler: &StandardScaler,
    table: &TeamTable,
) -> PredictionOutcome {
    match score(team1, team2, map, model, scaler, table) {
        Ok(result) => {
            debug!(
                "Prediction {} vs {} on {}: {:.3} ({})",
                team1,
                team2,
                map,
                result.win_prob,
                result.confidence.label()
            );
            PredictionOutcome::Success(result)
        }
        Err(e) => {
            warn!("Prediction {} vs {} on {} failed: {}", team1, team2, map, e);
            PredictionOutcome::Failure {
                error: format!("prediction failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TeamStats;
    use crate::model::LogisticModel;
    use approx::assert_relative_eq;

    /// Returns a fixed P(class 1) regardless of input.
    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn n_features(&self) -> usize {
            4
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], PredictError> {
            Ok([1.0 - self.0, self.0])
        }
    }

    fn team(rating: f64, maps: &[(&str, f64)]) -> TeamStats {
        TeamStats {
            avg_rating: Some(rating),
            map_win_rate: maps.iter().map(|(m, r)| (m.to_string(), *r)).collect(),
        }
    }

    fn ascent_table() -> TeamTable {
        let mut t = TeamTable::new();
        t.insert("A".into(), team(1.2, &[("Ascent", 0.6)]));
        t.insert("B".into(), team(1.0, &[("Ascent", 0.4)]));
        t
    }

    #[test]
    fn golden_ascent_probability() {
        let model = LogisticModel::new(vec![1.0, 2.0, 0.5, 0.0], 0.0);
        let scaler = StandardScaler::identity(4);
        let out = predict_match("A", "B", "Ascent", &model, &scaler, &ascent_table());
        // z = 0.2 + 0.4 + 0.1 = 0.7 → σ(0.7) ≈ 0.66819
        match out {
            PredictionOutcome::Success(r) => {
                assert_eq!(r.team1, "A");
                assert_eq!(r.team2, "B");
                assert_eq!(r.map, "Ascent");
                assert_relative_eq!(r.win_prob, 0.668, epsilon = 1e-12);
                assert_eq!(r.confidence, Confidence::Caution);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn scaler_is_applied_before_the_model() {
        let model = LogisticModel::new(vec![1.0, 0.0, 0.0, 0.0], 0.0);
        // centre rating_diff on its own value → logit 0
        let scaler = StandardScaler {
            mean: vec![0.2, 0.0, 0.0, 0.0],
            scale: vec![1.0; 4],
            n_features_in: Some(4),
        };
        let out = predict_match("A", "B", "Ascent", &model, &scaler, &ascent_table());
        assert_relative_eq!(out.win_prob().unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn confidence_threshold() {
        assert_eq!(Confidence::from_probability(0.79), Confidence::Caution);
        assert_eq!(Confidence::from_probability(0.21), Confidence::Caution);
        assert_eq!(Confidence::from_probability(0.5), Confidence::Caution);
        assert_eq!(Confidence::from_probability(0.81), Confidence::High);
        assert_eq!(Confidence::from_probability(0.19), Confidence::High);
        assert_eq!(Confidence::from_probability(1.0), Confidence::High);
        assert_eq!(Confidence::from_probability(0.0), Confidence::High);
    }

    #[test]
    fn outcome_probability_and_label_agree() {
        let scaler = StandardScaler::identity(4);
        // the 0.2 / 0.8 boundaries themselves are left to float rounding
        for i in (0..=20).filter(|i| *i != 4 && *i != 16) {
            let p = i as f64 / 20.0;
            let out = predict_match("A", "B", "Ascent", &FixedClassifier(p), &scaler, &ascent_table());
            let PredictionOutcome::Success(r) = out else {
                panic!("fixed classifier should not fail");
            };
            assert!((0.0..=1.0).contains(&r.win_prob));
            let outside = p < 0.2 || p > 0.8;
            assert_eq!(r.confidence == Confidence::High, outside, "p = {}", p);
        }
    }

    #[test]
    fn label_uses_unrounded_probability() {
        // 0.8004 rounds to 0.800 but is still beyond the margin
        let scaler = StandardScaler::identity(4);
        let out = predict_match("A", "B", "Ascent", &FixedClassifier(0.8004), &scaler, &ascent_table());
        let PredictionOutcome::Success(r) = out else {
            panic!("expected success");
        };
        assert_relative_eq!(r.win_prob, 0.8, epsilon = 1e-12);
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn unknown_team_yields_error_without_probability() {
        let model = LogisticModel::new(vec![1.0; 4], 0.0);
        let scaler = StandardScaler::identity(4);
        let out = predict_match("A", "NOPE", "Ascent", &model, &scaler, &ascent_table());
        assert!(out.win_prob().is_none());
        let msg = out.error().unwrap();
        assert!(!msg.is_empty());
        assert!(msg.contains("NOPE"), "got: {}", msg);

        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("win_prob").is_none());
        assert!(json["error"].as_str().unwrap().starts_with("prediction failed"));
    }

    #[test]
    fn scaler_dimension_mismatch_is_caught() {
        let model = LogisticModel::new(vec![1.0; 4], 0.0);
        let scaler = StandardScaler::identity(3);
        let out = predict_match("A", "B", "Ascent", &model, &scaler, &ascent_table());
        assert!(out.error().unwrap().contains("scaler expects 3 features"));
    }

    #[test]
    fn out_of_range_classifier_output_is_caught() {
        let scaler = StandardScaler::identity(4);
        let out = predict_match("A", "B", "Ascent", &FixedClassifier(1.5), &scaler, &ascent_table());
        assert!(out.error().is_some());
    }

    #[test]
    fn success_serialises_flat_with_label() {
        let out = PredictionOutcome::Success(PredictionResult {
            team1: "FNC".into(),
            team2: "TH".into(),
            map: "Lotus".into(),
            win_prob: 0.912,
            confidence: Confidence::High,
        });
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["team1"], "FNC");
        assert_eq!(json["confidence"], "high confidence");
        assert_relative_eq!(json["win_prob"].as_f64().unwrap(), 0.912, epsilon = 1e-12);
    }
}
