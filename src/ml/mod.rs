//! Binary churn classifiers loaded from JSON exports.
//!
//! Both model families implement [`ChurnModel`]. Only tree ensembles report
//! feature importances; linear models return `None` and the UI degrades to a
//! text message.

mod forest;
mod logreg;

pub use forest::{RandomForestModel, Tree, TreeNode};
pub use logreg::LogisticRegressionModel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Class count every churn model must produce probabilities for.
pub const BINARY_CLASSES: usize = 2;
/// Index of the churn ("yes") class in a probability vector.
pub const POSITIVE_CLASS_INDEX: usize = 1;

/// Errors raised while scoring a single row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The row width does not match the trained feature count.
    #[error("Model expects {expected} features but the input row has {actual}")]
    FeatureCount { expected: usize, actual: usize },
    /// The model produced probabilities for something other than two classes.
    #[error("Expected probabilities for 2 classes, got {actual}")]
    ClassCount { actual: usize },
}

/// Scoring surface shared by every loaded classifier.
pub trait ChurnModel: Send + Sync {
    /// Short identifier for logs, e.g. `random_forest`.
    fn kind(&self) -> &'static str;

    /// Number of features seen at training time.
    fn n_features(&self) -> usize;

    /// Class probabilities for one row, ordered like the training labels.
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictError>;

    /// Per-feature importances aligned with the training columns, if the
    /// model family defines them.
    fn feature_importances(&self) -> Option<Vec<f64>>;
}

/// On-disk model export, tagged by model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForestModel),
    LogisticRegression(LogisticRegressionModel),
}

impl ModelArtifact {
    /// Check structural invariants before the model is used.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::RandomForest(model) => model.validate(),
            ModelArtifact::LogisticRegression(model) => model.validate(),
        }
    }

    /// Move the concrete model behind the scoring trait.
    pub fn into_model(self) -> Box<dyn ChurnModel> {
        match self {
            ModelArtifact::RandomForest(model) => Box::new(model),
            ModelArtifact::LogisticRegression(model) => Box::new(model),
        }
    }
}

fn check_row_width(expected: usize, row: &[f64]) -> Result<(), PredictError> {
    if row.len() != expected {
        return Err(PredictError::FeatureCount {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
