//! Scoring a row and deriving the churn risk banner.

use crate::ml::{BINARY_CLASSES, ChurnModel, POSITIVE_CLASS_INDEX, PredictError};

use super::row::InputRow;

/// Probabilities strictly above this are high risk.
pub const RISK_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Banner text shown under the probability.
    pub fn banner(self) -> &'static str {
        match self {
            RiskLevel::High => "⚠️ High Risk of Churn!",
            RiskLevel::Low => "✅ Low Risk of Churn",
        }
    }

    /// Plain label used in logs and the scoring tool.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "high risk",
            RiskLevel::Low => "low risk",
        }
    }
}

/// Churn probability for one row plus its risk level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub probability: f64,
    pub risk: RiskLevel,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            risk: RiskLevel::from_probability(probability),
        }
    }

    /// Probability rounded to two decimals, e.g. `0.70`.
    pub fn probability_text(&self) -> String {
        format!("{:.2}", self.probability)
    }
}

/// Score `row` and pick the positive class probability.
pub fn predict(model: &dyn ChurnModel, row: &InputRow) -> Result<PredictionResult, PredictError> {
    let proba = model.predict_proba(row.values())?;
    if proba.len() != BINARY_CLASSES {
        return Err(PredictError::ClassCount {
            actual: proba.len(),
        });
    }
    let result = PredictionResult::from_probability(proba[POSITIVE_CLASS_INDEX]);
    tracing::debug!(
        probability = result.probability,
        risk = result.risk.label(),
        "Scored churn row"
    );
    Ok(result)
}
