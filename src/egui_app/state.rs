//! Per-window form state kept between egui frames.

use crate::churn::{ImportanceError, ImportancePanel, PageView, PredictionResult, UserSelection};
use crate::ml::PredictError;

/// Widget values plus the result of the last button press.
///
/// A shown prediction belongs to the inputs that produced it: editing any
/// input hides it again, the same way a rerun without a press would.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    selection: UserSelection,
    prediction: Option<Result<PredictionResult, PredictError>>,
    reported_fallback: Option<ImportanceError>,
}

impl FormState {
    pub fn selection(&self) -> UserSelection {
        self.selection
    }

    /// Store the values read back from the widgets this frame.
    pub fn apply_selection(&mut self, selection: UserSelection) {
        let selection = selection.clamped();
        if selection != self.selection {
            self.selection = selection;
            self.prediction = None;
        }
    }

    /// Keep the prediction of a pressed frame and log new fallbacks once.
    pub fn absorb(&mut self, page: &PageView) {
        if let Some(prediction) = &page.prediction {
            match prediction {
                Ok(result) => tracing::info!(
                    probability = result.probability,
                    risk = result.risk.label(),
                    "Prediction requested"
                ),
                Err(err) => tracing::error!("Prediction failed: {err}"),
            }
            self.prediction = Some(prediction.clone());
        }
        if let ImportancePanel::Unavailable(err) = &page.importance
            && self.reported_fallback.as_ref() != Some(err)
        {
            tracing::warn!("{}", ImportancePanel::fallback_message(err));
            self.reported_fallback = Some(err.clone());
        }
    }

    pub fn prediction(&self) -> Option<&Result<PredictionResult, PredictError>> {
        self.prediction.as_ref()
    }
}
