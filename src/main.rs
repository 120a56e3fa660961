#![deny(missing_docs)]

//! Entry point for the egui churn prediction form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::path::PathBuf;

use churnsight::artifacts::{ArtifactContext, ArtifactPaths};
use churnsight::churn::page::PAGE_TITLE;
use churnsight::config::{self, AppConfig};
use churnsight::egui_app::ui::{ChurnApp, MIN_VIEWPORT_SIZE};
use churnsight::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let overrides = match parse_args(std::env::args().skip(1).collect()) {
        Ok(overrides) => overrides,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    let config = match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Using default settings: {err}");
            AppConfig::default()
        }
    };
    if let Err(err) = logging::init(config.log_filter.as_deref()) {
        eprintln!("Logging disabled: {err}");
    }

    let paths = overrides.apply(ArtifactPaths::from(&config));
    let artifacts = ArtifactContext::load(&paths).map_err(|err| {
        tracing::error!("Cannot start without artifacts: {err}");
        err.to_string()
    });

    let viewport = egui::ViewportBuilder::default()
        .with_title(PAGE_TITLE)
        .with_inner_size([1180.0, 760.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        PAGE_TITLE,
        native_options,
        Box::new(move |_cc| match artifacts {
            Ok(artifacts) => Ok(Box::new(ChurnApp::new(artifacts))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Artifact paths given on the command line.
#[derive(Debug, Default, PartialEq)]
struct PathOverrides {
    model: Option<PathBuf>,
    columns: Option<PathBuf>,
}

impl PathOverrides {
    fn apply(self, paths: ArtifactPaths) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.unwrap_or(paths.model),
            columns: self.columns.unwrap_or(paths.columns),
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<PathOverrides, String> {
    let mut overrides = PathOverrides::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--model" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--model requires a value".to_string())?;
                overrides.model = Some(PathBuf::from(value));
            }
            "--columns" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--columns requires a value".to_string())?;
                overrides.columns = Some(PathBuf::from(value));
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(overrides)
}

fn help_text() -> String {
    [
        "churnsight",
        "",
        "Usage:",
        "  churnsight [--model <churn_model.json>] [--columns <feature_columns.json>]",
        "",
        "Paths default to the values in config.toml inside the app directory.",
    ]
    .join("\n")
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
