//! Horizontal top-N importance bar chart painted directly with the painter.

use eframe::egui::{self, Align2, FontId, RichText, Sense, StrokeKind};

use super::style;
use crate::churn::page::{CHART_TITLE, IMPORTANCE_HEADING};
use crate::churn::{ImportancePanel, ImportanceTable};

const ROW_HEIGHT: f32 = 24.0;
const BAR_GAP: f32 = 4.0;
const LABEL_WIDTH: f32 = 170.0;
const VALUE_WIDTH: f32 = 56.0;
const AXIS_HEIGHT: f32 = 22.0;

pub(super) fn render(ui: &mut egui::Ui, panel: &ImportancePanel) {
    ui.label(RichText::new(IMPORTANCE_HEADING).heading());
    ui.add_space(4.0);
    match panel {
        ImportancePanel::Chart(table) => render_chart(ui, table),
        ImportancePanel::Unavailable(err) => {
            ui.label(ImportancePanel::fallback_message(err));
        }
    }
}

fn render_chart(ui: &mut egui::Ui, table: &ImportanceTable) {
    let palette = style::palette();
    ui.label(RichText::new(CHART_TITLE).strong());
    let entries = table.entries();
    let width = ui.available_width().clamp(320.0, 820.0);
    let height = entries.len() as f32 * ROW_HEIGHT + AXIS_HEIGHT;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(12.0);

    let bar_left = rect.left() + LABEL_WIDTH;
    let bar_span = (rect.right() - VALUE_WIDTH - bar_left).max(1.0);
    let max = table.max_importance();

    for (idx, entry) in entries.iter().enumerate() {
        let top = rect.top() + idx as f32 * ROW_HEIGHT;
        let center_y = top + ROW_HEIGHT * 0.5;
        painter.text(
            egui::pos2(bar_left - 8.0, center_y),
            Align2::RIGHT_CENTER,
            &entry.feature,
            font.clone(),
            palette.text_primary,
        );
        let length = bar_fraction(entry.importance, max) * bar_span;
        let bar = egui::Rect::from_min_size(
            egui::pos2(bar_left, top + BAR_GAP * 0.5),
            egui::vec2(length, ROW_HEIGHT - BAR_GAP),
        );
        painter.rect_filled(bar, 0.0, style::viridis_for_bar(idx, entries.len()));
        painter.text(
            egui::pos2(bar.right() + 6.0, center_y),
            Align2::LEFT_CENTER,
            format!("{:.3}", entry.importance),
            font.clone(),
            palette.text_muted,
        );
    }

    let axis_y = rect.top() + entries.len() as f32 * ROW_HEIGHT;
    let axis = egui::Rect::from_min_max(
        egui::pos2(bar_left, rect.top()),
        egui::pos2(bar_left + bar_span, axis_y),
    );
    painter.rect_stroke(axis, 0.0, style::section_stroke(), StrokeKind::Inside);
    painter.text(
        egui::pos2(bar_left + bar_span * 0.5, axis_y + AXIS_HEIGHT * 0.5),
        Align2::CENTER_CENTER,
        "Importance",
        font.clone(),
        palette.text_muted,
    );
    painter.text(
        egui::pos2(rect.left(), axis_y + AXIS_HEIGHT * 0.5),
        Align2::LEFT_CENTER,
        "Feature",
        font,
        palette.text_muted,
    );
}

/// Bar length as a share of the largest importance.
fn bar_fraction(importance: f64, max: f64) -> f32 {
    if !importance.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (importance / max).clamp(0.0, 1.0) as f32
}
