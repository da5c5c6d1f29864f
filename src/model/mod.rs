pub mod logistic;
pub mod scaler;

pub use logistic::LogisticModel;
pub use scaler::StandardScaler;

use crate::predict::PredictError;

/// A pre-trained binary classifier exposing class probabilities.
pub trait Classifier: Send + Sync {
    /// Expected length of the (scaled) input vector.
    fn n_features(&self) -> usize;

    /// `[P(class 0), P(class 1)]` for one scaled feature vector.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError>;
}
