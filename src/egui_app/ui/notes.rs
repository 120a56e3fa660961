use eframe::egui::{self, RichText};

use super::style;
use crate::churn::page::{NOTES, NOTES_HEADING};

pub(super) fn render(ui: &mut egui::Ui) {
    ui.label(RichText::new(NOTES_HEADING).heading());
    ui.add_space(4.0);
    let muted = style::palette().text_muted;
    for note in NOTES {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("•").color(muted));
            ui.label(note);
        });
    }
}
