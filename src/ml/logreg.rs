//! Binary logistic regression over the raw feature row.

use serde::{Deserialize, Serialize};

use super::{ChurnModel, PredictError, check_row_width};

/// Linear churn model: `P(churn) = sigmoid(w·x + b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    pub classes: Vec<String>,
    /// One weight per training column.
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegressionModel {
    /// Validate the model dimensions.
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.len() != 2 {
            return Err("Logistic regression exports must define exactly 2 classes".to_string());
        }
        if self.weights.is_empty() {
            return Err("weights must not be empty".to_string());
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err("weights and intercept must be finite".to_string());
        }
        Ok(())
    }
}

impl ChurnModel for LogisticRegressionModel {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        check_row_width(self.weights.len(), row)?;
        let logit = self
            .weights
            .iter()
            .zip(row)
            .fold(self.intercept, |acc, (w, x)| acc + w * x);
        let positive = sigmoid(logit);
        Ok(vec![1.0 - positive, positive])
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        None
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
