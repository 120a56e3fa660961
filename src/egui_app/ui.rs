//! egui renderer for the churn form.
//!
//! Every frame reads the widgets, builds a fresh [`PageView`] and paints it.

mod importance_chart;
mod notes;
mod result_panel;
mod sidebar;
pub mod style;

use eframe::egui::{self, RichText};

use crate::artifacts::ArtifactContext;
use crate::churn::page::{APP_HEADING, INTRO, PREDICT_BUTTON, SIDEBAR_HEADING};
use crate::churn::{PageView, build_page};
use crate::egui_app::state::FormState;

/// Smallest window size that keeps the sidebar and chart readable.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [760.0, 520.0];

/// Renders the form against artifacts loaded at startup.
pub struct ChurnApp {
    artifacts: ArtifactContext,
    form: FormState,
    visuals_set: bool,
}

impl ChurnApp {
    pub fn new(artifacts: ArtifactContext) -> Self {
        Self {
            artifacts,
            form: FormState::default(),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("customer_inputs")
            .resizable(true)
            .default_width(280.0)
            .min_width(240.0)
            .max_width(420.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading(SIDEBAR_HEADING);
                ui.add_space(8.0);
                let mut selection = self.form.selection();
                sidebar::render_inputs(ui, &mut selection);
                self.form.apply_selection(selection);
            });
    }

    fn render_page(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading(RichText::new(APP_HEADING).strong());
        ui.label(RichText::new(INTRO).color(palette.text_muted));
        ui.add_space(12.0);

        let pressed = ui.button(PREDICT_BUTTON).clicked();
        let page: PageView = build_page(&self.form.selection(), &self.artifacts, pressed);
        self.form.absorb(&page);

        if let Some(prediction) = self.form.prediction() {
            ui.add_space(12.0);
            result_panel::render(ui, prediction);
        }
        ui.add_space(16.0);
        importance_chart::render(ui, &page.importance);
        ui.add_space(16.0);
        notes::render(ui);
    }
}

impl eframe::App for ChurnApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_sidebar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.render_page(ui));
        });
    }
}
