//! Pure page model: inputs and artifacts in, everything to display out.
//!
//! Nothing here keeps state between calls. The egui frame loop and the
//! scoring tool both call [`build_page`] and only differ in how they paint
//! the result.

use crate::artifacts::ArtifactContext;
use crate::ml::PredictError;

use super::importance::{ImportanceError, ImportanceTable, top_importances};
use super::predict::{PredictionResult, predict};
use super::row::build_input_row;
use super::selection::UserSelection;

pub const PAGE_TITLE: &str = "Customer Churn Prediction";
pub const APP_HEADING: &str = "📊 Customer Churn Prediction App";
pub const INTRO: &str = "This app predicts the probability that a customer will churn based on their account details and services.";
pub const SIDEBAR_HEADING: &str = "Enter Customer Details";
pub const PREDICT_BUTTON: &str = "Predict Churn";
pub const RESULT_HEADING: &str = "Prediction Result";
pub const IMPORTANCE_HEADING: &str = "🌟 Feature Importance";
pub const CHART_TITLE: &str = "Top 10 Feature Importances";
pub const NOTES_HEADING: &str = "Notes";
pub const NOTES: [&str; 3] = [
    "Month-to-month contracts, high monthly charges, and short tenure are key drivers of churn.",
    "This app uses a Random Forest model trained on historical customer data.",
    "Use the sidebar to change inputs and see predictions in real-time.",
];

/// Content of the chart panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportancePanel {
    Chart(ImportanceTable),
    /// Human-readable reason the chart was replaced by text.
    Unavailable(ImportanceError),
}

impl ImportancePanel {
    /// Text shown instead of the chart.
    pub fn fallback_message(error: &ImportanceError) -> String {
        format!("Could not generate feature importance plot: {error}")
    }
}

/// Everything one render pass displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// `None` when this pass did not include a button press.
    pub prediction: Option<Result<PredictionResult, PredictError>>,
    pub importance: ImportancePanel,
}

/// Build one render pass from the current inputs.
pub fn build_page(
    selection: &UserSelection,
    artifacts: &ArtifactContext,
    predict_pressed: bool,
) -> PageView {
    let prediction = predict_pressed.then(|| {
        let row = build_input_row(artifacts.schema(), selection);
        predict(artifacts.model(), &row)
    });
    PageView {
        prediction,
        importance: importance_panel(artifacts),
    }
}

/// Chart content for the loaded model; never fails.
pub fn importance_panel(artifacts: &ArtifactContext) -> ImportancePanel {
    let model = artifacts.model();
    let result = match model.feature_importances() {
        Some(importances) => top_importances(artifacts.schema(), &importances),
        None => Err(ImportanceError::Unavailable {
            kind: model.kind().to_string(),
        }),
    };
    match result {
        Ok(table) => ImportancePanel::Chart(table),
        Err(err) => ImportancePanel::Unavailable(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::churn::row::FeatureSchema;
    use crate::churn::selection::ContractType;
    use crate::ml::{ChurnModel, LogisticRegressionModel};

    /// Echoes tenure back as the churn probability so tests can see which
    /// row was scored.
    struct TenureEcho;

    impl ChurnModel for TenureEcho {
        fn kind(&self) -> &'static str {
            "tenure_echo"
        }

        fn n_features(&self) -> usize {
            4
        }

        fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
            let p = row[0] / 100.0;
            Ok(vec![1.0 - p, p])
        }

        fn feature_importances(&self) -> Option<Vec<f64>> {
            Some(vec![0.4, 0.3, 0.2, 0.1])
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            ["tenure", "MonthlyCharges", "Contract", "InternetService"]
                .map(String::from)
                .to_vec(),
        )
        .unwrap()
    }

    fn echo_context() -> ArtifactContext {
        ArtifactContext::new(Box::new(TenureEcho), schema()).unwrap()
    }

    #[test]
    fn no_press_means_no_prediction() {
        let page = build_page(&UserSelection::default(), &echo_context(), false);
        assert!(page.prediction.is_none());
        assert!(matches!(page.importance, ImportancePanel::Chart(_)));
    }

    #[test]
    fn repeated_presses_reflect_latest_inputs() {
        let context = echo_context();
        let first = UserSelection {
            tenure: 70,
            ..UserSelection::default()
        };
        let second = UserSelection {
            tenure: 20,
            contract: ContractType::TwoYear,
            ..UserSelection::default()
        };

        let page = build_page(&first, &context, true);
        let result = page.prediction.unwrap().unwrap();
        assert_eq!(result.probability_text(), "0.70");

        let page = build_page(&second, &context, true);
        let result = page.prediction.unwrap().unwrap();
        assert_eq!(result.probability_text(), "0.20");
        assert_eq!(result.risk, crate::churn::RiskLevel::Low);
    }

    #[test]
    fn linear_model_falls_back_to_message() {
        let model = LogisticRegressionModel {
            classes: vec!["No".into(), "Yes".into()],
            weights: vec![0.0; 4],
            intercept: 0.0,
        };
        let context = ArtifactContext::new(Box::new(model), schema()).unwrap();
        let page = build_page(&UserSelection::default(), &context, true);

        let ImportancePanel::Unavailable(err) = &page.importance else {
            panic!("expected fallback, got {:?}", page.importance);
        };
        assert_eq!(
            ImportancePanel::fallback_message(err),
            "Could not generate feature importance plot: model of kind `logistic_regression` has no feature importances"
        );
        assert!(page.prediction.unwrap().is_ok());
    }
}
