//! egui front end for the churn form.

pub mod state;
pub mod ui;
