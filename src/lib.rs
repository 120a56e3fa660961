//! Library exports shared by the GUI, the scoring tool, tests and benches.
/// Application directory resolution.
pub mod app_dirs;
/// Model and feature column loading.
pub mod artifacts;
/// Churn form domain logic.
pub mod churn;
/// TOML settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Classifier implementations.
pub mod ml;
#[cfg(test)]
mod test_logs;
