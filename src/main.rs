//! ensayo CLI: reproducible research experiment runner.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use ensayo::config::ExperimentConfig;
use ensayo::daily::{self, DailyEntry};
use ensayo::data::generate_linear_data;
use ensayo::experiment::{
    save_params, save_results, write_report, write_report_request, ExperimentRecord,
    OutputLayout, SummaryLedger,
};
use ensayo::model::{LinearModel, ResearchModel};
use ensayo::{logging, metrics};

#[derive(Parser)]
#[command(name = "ensayo", version, about = "Reproducible research experiment runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sample linear-regression experiment from a config file.
    Run {
        /// Path to the YAML config file.
        #[arg(long, default_value = "configs/sample.yaml")]
        config: PathBuf,
    },

    /// Run a minimal smoke experiment without a config file.
    Train {
        /// Learning rate.
        #[arg(long, default_value_t = 0.01)]
        lr: f64,

        /// Experiment name.
        #[arg(long, default_value = "train")]
        experiment_name: String,

        /// Output root directory.
        #[arg(long, default_value = "outputs")]
        output_root: PathBuf,
    },

    /// Append a human-reviewed entry to the daily research log.
    DailyReport {
        /// Path to report_request.json (default: outputs/latest).
        #[arg(long)]
        request: Option<PathBuf>,

        /// Output dir containing report_request.json.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// One-line summary.
        #[arg(long)]
        summary: Option<String>,

        /// Pass/Fail/Continue.
        #[arg(long)]
        decision: Option<String>,

        /// Next action to take.
        #[arg(long)]
        next_action: Option<String>,

        /// Extra notes.
        #[arg(long)]
        notes: Option<String>,

        /// Directory of the dated research logs.
        #[arg(long, default_value = daily::DEFAULT_DOCS_DIR)]
        docs_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config } => run_experiment(&config),
        Commands::Train {
            lr,
            experiment_name,
            output_root,
        } => train(lr, &experiment_name, &output_root),
        Commands::DailyReport {
            request,
            output_dir,
            summary,
            decision,
            next_action,
            notes,
            docs_dir,
        } => daily_report(
            request,
            output_dir,
            summary,
            decision,
            next_action,
            notes,
            &docs_dir,
        ),
    }
}

fn run_experiment(config_path: &Path) -> anyhow::Result<()> {
    let config = ExperimentConfig::load(config_path)?;
    let layout = OutputLayout::prepare(&config.experiment_name, &config.output_dir, None)?;
    let _log = logging::init_run_logging(&layout)?;

    tracing::info!(
        experiment = %config.experiment_name,
        timestamp = %layout.timestamp(),
        "starting experiment"
    );

    let (x, y) = generate_linear_data(
        config.n_samples,
        config.slope,
        config.intercept,
        config.noise_std,
        config.seed,
    )?;
    let model = LinearModel::fit(&x, &y)?;
    let y_pred = model.predict(&x);

    let mse = metrics::mse(&y, &y_pred)?;
    let mut metric_map = Map::new();
    metric_map.insert("mse".to_string(), Value::from(mse));
    metric_map.insert("rmse".to_string(), Value::from(metrics::rmse(&y, &y_pred)?));
    metric_map.insert("mae".to_string(), Value::from(metrics::mae(&y, &y_pred)?));
    metric_map.insert("r2".to_string(), Value::from(metrics::r2(&y, &y_pred)?));

    let record = ExperimentRecord::builder(&config.experiment_name)
        .config(config.as_params())
        .metrics(metric_map)
        .model_params(model.params())
        .build();

    let fit_line = format!("y = {:.2}x + {:.2}", model.slope, model.intercept);
    save_results(&record, &layout)?;
    save_params(&config.as_params(), &layout)?;
    write_report(
        &[
            "# Experiment Report".to_string(),
            String::new(),
            format!("- Timestamp: {}", layout.timestamp()),
            format!("- Experiment: {}", layout.experiment_name()),
            "- Status: Success".to_string(),
            format!("- MSE: {mse:.4}"),
            format!("- Fit: {fit_line}"),
        ],
        &layout,
    )?;
    let request_path =
        write_report_request(&layout, Some(config_path), record.scalar_metrics())?;
    SummaryLedger::new(layout.root()).append(&record, &layout)?;

    tracing::info!(mse, "experiment complete; results saved to {}", layout.dir().display());
    tracing::info!("estimated: {fit_line}");
    tracing::info!("daily report request written to {}", request_path.display());
    Ok(())
}

fn train(lr: f64, experiment_name: &str, output_root: &Path) -> anyhow::Result<()> {
    let layout = OutputLayout::prepare(experiment_name, output_root, None)?;
    let _log = logging::init_run_logging(&layout)?;

    tracing::info!(lr, experiment = experiment_name, "starting experiment");

    let model = ResearchModel::new(lr);
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let result = model.run_computation(&data);
    tracing::info!(result, "result computed");

    let mut config_map = Map::new();
    config_map.insert("lr".to_string(), Value::from(lr));
    config_map.insert(
        "experiment_name".to_string(),
        Value::from(experiment_name),
    );
    config_map.insert(
        "output_root".to_string(),
        Value::from(output_root.display().to_string()),
    );

    let mut metric_map = Map::new();
    metric_map.insert("success".to_string(), Value::from(true));
    metric_map.insert("final_value".to_string(), Value::from(result));

    let record = ExperimentRecord::builder(experiment_name)
        .config(config_map.clone())
        .metrics(metric_map)
        .build();

    save_results(&record, &layout)?;
    save_params(&config_map, &layout)?;
    write_report(
        &[
            "# Experiment Report".to_string(),
            String::new(),
            format!("- Timestamp: {}", layout.timestamp()),
            format!("- Experiment: {experiment_name}"),
            "- Status: Success".to_string(),
            format!("- Result: {result}"),
        ],
        &layout,
    )?;
    let request_path = write_report_request(&layout, None, record.scalar_metrics())?;
    SummaryLedger::new(layout.root()).append(&record, &layout)?;

    tracing::info!("experiment finished; results saved to {}", layout.dir().display());
    tracing::info!("daily report request written to {}", request_path.display());
    Ok(())
}

fn daily_report(
    request: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    summary: Option<String>,
    decision: Option<String>,
    next_action: Option<String>,
    notes: Option<String>,
    docs_dir: &Path,
) -> anyhow::Result<()> {
    let request_path = daily::resolve_request_path(request, output_dir);
    let request = daily::load_request(&request_path)?;

    let entry = DailyEntry {
        summary: field_value(summary, "Summary"),
        decision: field_value(decision, "Decision (Pass/Fail/Continue)"),
        next_action: field_value(next_action, "Next action"),
        notes: field_value(notes, "Notes"),
    };

    let (date, _) = daily::split_timestamp(&request.timestamp)?;
    let lines = daily::render_entry(&request, &entry)?;
    let log_path = daily::append_daily_log(&lines, docs_dir, &date)?;

    println!("Wrote daily report entry to {}", log_path.display());
    Ok(())
}

/// Resolve an entry field: explicit flag, interactive prompt on a TTY, or
/// `TBD` when running non-interactively.
fn field_value(value: Option<String>, prompt: &str) -> String {
    if let Some(value) = value {
        return value;
    }
    if !std::io::stdin().is_terminal() {
        return "TBD".to_string();
    }
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_or_else(
            |_| "TBD".to_string(),
            |text| {
                let text = text.trim().to_string();
                if text.is_empty() {
                    "TBD".to_string()
                } else {
                    text
                }
            },
        )
}
