use eframe::egui::{self, Frame, Margin, RichText, Stroke};

use super::style;
use crate::churn::page::RESULT_HEADING;
use crate::churn::{PredictionResult, RiskLevel};
use crate::ml::PredictError;

/// Probability line plus a colored risk banner, or the scoring error.
pub(super) fn render(ui: &mut egui::Ui, prediction: &Result<PredictionResult, PredictError>) {
    ui.label(RichText::new(RESULT_HEADING).heading());
    ui.add_space(4.0);
    match prediction {
        Ok(result) => {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                ui.label("Churn Probability:");
                ui.label(RichText::new(result.probability_text()).strong());
            });
            ui.add_space(6.0);
            let (fill, text) = match result.risk {
                RiskLevel::High => style::error_banner(),
                RiskLevel::Low => style::success_banner(),
            };
            banner(ui, result.risk.banner(), fill, text);
        }
        Err(err) => {
            let (fill, text) = style::error_banner();
            banner(ui, &format!("Prediction failed: {err}"), fill, text);
        }
    }
}

fn banner(ui: &mut egui::Ui, message: &str, fill: egui::Color32, text: egui::Color32) {
    Frame::new()
        .fill(fill)
        .stroke(Stroke::new(1.0, text))
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(text).strong());
        });
}
