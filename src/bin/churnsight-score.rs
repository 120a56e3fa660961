//! Headless scoring: prints the same page the form would show.

use std::path::PathBuf;

use churnsight::artifacts::{ArtifactContext, ArtifactPaths};
use churnsight::churn::page::{CHART_TITLE, NOTES, NOTES_HEADING, RESULT_HEADING};
use churnsight::churn::selection::TENURE_RANGE;
use churnsight::churn::{
    CategoryOption, ContractType, ImportancePanel, InternetService, UserSelection, build_page,
};
use churnsight::config::{self, AppConfig};
use churnsight::logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    model_path: Option<PathBuf>,
    columns_path: Option<PathBuf>,
    selection: UserSelection,
    predict: bool,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let config = config::load_or_default().unwrap_or_else(|err| {
        eprintln!("Using default settings: {err}");
        AppConfig::default()
    });
    if let Err(err) = logging::init(Some(config.log_filter.as_deref().unwrap_or("warn"))) {
        eprintln!("Logging disabled: {err}");
    }

    let defaults = ArtifactPaths::from(&config);
    let paths = ArtifactPaths {
        model: options.model_path.unwrap_or(defaults.model),
        columns: options.columns_path.unwrap_or(defaults.columns),
    };
    let artifacts = ArtifactContext::load(&paths).map_err(|err| err.to_string())?;
    let selection = options.selection.clamped();
    let page = build_page(&selection, &artifacts, options.predict);

    println!(
        "inputs: tenure={} monthly_charges={:.2} contract={} internet={}",
        selection.tenure,
        selection.monthly_charges,
        selection.contract.label(),
        selection.internet.label()
    );
    if let Some(prediction) = &page.prediction {
        println!();
        println!("{RESULT_HEADING}");
        match prediction {
            Ok(result) => {
                println!("Churn Probability: {}", result.probability_text());
                println!("{}", result.risk.banner());
            }
            Err(err) => println!("Prediction failed: {err}"),
        }
    }

    println!();
    match &page.importance {
        ImportancePanel::Chart(table) => {
            println!("{CHART_TITLE}");
            let width = table
                .entries()
                .iter()
                .map(|entry| entry.feature.len())
                .max()
                .unwrap_or(0);
            for entry in table.entries() {
                println!("  {:<width$}  {:.4}", entry.feature, entry.importance);
            }
        }
        ImportancePanel::Unavailable(err) => println!("{}", ImportancePanel::fallback_message(err)),
    }

    println!();
    println!("{NOTES_HEADING}");
    for note in NOTES {
        println!("- {note}");
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        model_path: None,
        columns_path: None,
        selection: UserSelection::default(),
        predict: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        if flag == "-h" || flag == "--help" {
            return Err(help_text());
        }
        if flag == "--predict" {
            options.predict = true;
            idx += 1;
            continue;
        }
        idx += 1;
        let value = args
            .get(idx)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--model" => options.model_path = Some(PathBuf::from(value)),
            "--columns" => options.columns_path = Some(PathBuf::from(value)),
            "--tenure" => {
                let months = value
                    .parse::<i64>()
                    .map_err(|_| format!("Invalid --tenure value: {value}"))?;
                options.selection.tenure = tenure_months(months);
            }
            "--monthly-charges" => {
                options.selection.monthly_charges = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --monthly-charges value: {value}"))?;
            }
            "--contract" => {
                options.selection.contract = ContractType::parse(value)
                    .ok_or_else(|| format!("Invalid --contract value: {value}"))?;
            }
            "--internet" => {
                options.selection.internet = InternetService::parse(value)
                    .ok_or_else(|| format!("Invalid --internet value: {value}"))?;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(options)
}

/// Pull a parsed tenure into the slider range.
fn tenure_months(months: i64) -> u32 {
    let low = i64::from(*TENURE_RANGE.start());
    let high = i64::from(*TENURE_RANGE.end());
    u32::try_from(months.clamp(low, high)).unwrap_or(*TENURE_RANGE.start())
}

fn help_text() -> String {
    [
        "churnsight-score",
        "",
        "Usage:",
        "  churnsight-score [options] [--predict]",
        "",
        "Options:",
        "  --model <path>               Model export (default from config.toml).",
        "  --columns <path>             Feature column export (default from config.toml).",
        "  --tenure <0-72>              Tenure in months (default: 12).",
        "  --monthly-charges <0-200>    Monthly charges (default: 70.0).",
        "  --contract <month-to-month|one-year|two-year>",
        "  --internet <dsl|fiber|no>",
        "  --predict                    Score the inputs, like pressing Predict Churn.",
    ]
    .join("\n")
}
