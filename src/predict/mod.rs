pub mod features;
pub mod scoring;

pub use scoring::{predict_match, PredictionOutcome};

use thiserror::Error;

/// Length of the feature vector the model was trained on.
pub const FEATURE_COUNT: usize = 4;

/// Win rate assumed for a map a team has no history on.
pub const DEFAULT_WIN_RATE: f64 = 0.5;

/// Failures that can occur while scoring a single match-up.
///
/// These are never fatal: [`predict_match`] folds them into a
/// [`PredictionOutcome::Failure`].
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("unknown team '{0}'")]
    UnknownTeam(String),

    #[error("{stage} expects {expected} features, got {got}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("non-finite {0}")]
    NonFinite(&'static str),

    #[error("probability {0} outside [0, 1]")]
    OutOfRange(f64),
}
