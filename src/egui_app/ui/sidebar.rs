use eframe::egui::{self, RichText};

use super::style;
use crate::churn::selection::{MONTHLY_CHARGES_RANGE, TENURE_RANGE};
use crate::churn::{CategoryOption, UserSelection};

/// Draw the four input controls, writing edits back into `selection`.
pub(super) fn render_inputs(ui: &mut egui::Ui, selection: &mut UserSelection) {
    field_label(ui, "Tenure (months)");
    ui.add(
        egui::DragValue::new(&mut selection.tenure)
            .range(TENURE_RANGE)
            .speed(1.0)
            .suffix(" mo"),
    );
    ui.add_space(ui.spacing().item_spacing.y * 2.0);

    field_label(ui, "Monthly Charges");
    ui.add(
        egui::DragValue::new(&mut selection.monthly_charges)
            .range(MONTHLY_CHARGES_RANGE)
            .speed(0.5)
            .fixed_decimals(2),
    );
    ui.add_space(ui.spacing().item_spacing.y * 2.0);

    field_label(ui, "Contract Type");
    category_combo(ui, "contract_combo", &mut selection.contract);
    ui.add_space(ui.spacing().item_spacing.y * 2.0);

    field_label(ui, "Internet Service");
    category_combo(ui, "internet_combo", &mut selection.internet);
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).color(style::palette().text_muted));
}

fn category_combo<T: CategoryOption>(ui: &mut egui::Ui, id: &str, current: &mut T) {
    egui::ComboBox::from_id_salt(id)
        .width(200.0)
        .selected_text(current.label())
        .show_ui(ui, |ui| {
            for option in T::ALL {
                ui.selectable_value(current, *option, option.label());
            }
        });
}
