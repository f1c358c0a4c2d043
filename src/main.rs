//! CLI entry point for the UFO sighting report tool.
//!
//! Provides subcommands for producing the full set of CSV exports, printing
//! the tag frequency table, and printing a top-K credibility table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use ufo_reports::{
    analyzers::{extract_tag_count, filter_by_code},
    config::PipelineConfig,
    output::{render_tag_table, render_top_k},
    parser::load_records,
    pipeline::run_pipeline,
};

#[derive(Parser)]
#[command(name = "ufo_reports")]
#[command(about = "Filter and tabulate UFO sighting records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the quality export and the per-code exports
    Process {
        /// JSON file holding the sighting records
        #[arg(value_name = "INPUT", default_value = "hatch_data.json")]
        input: String,

        /// Directory the CSV files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: String,

        /// Optional JSON config overriding thresholds and target codes
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the tag frequency table across all flag fields
    Tags {
        #[arg(value_name = "INPUT", default_value = "hatch_data.json")]
        input: String,
    },
    /// Print the most credible records as a markdown table
    Top {
        #[arg(value_name = "INPUT", default_value = "hatch_data.json")]
        input: String,

        /// Number of rows to show
        #[arg(short, default_value_t = 5)]
        k: usize,

        /// Restrict to records carrying this code
        #[arg(long)]
        code: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            config,
        } => {
            let config = match config {
                Some(path) => PipelineConfig::load(&path)
                    .with_context(|| format!("loading config from {path}"))?,
                None => PipelineConfig::default(),
            };
            let records = load_records(&input)?;
            let report = run_pipeline(&records, &config, Path::new(&output_dir))
                .with_context(|| format!("processing {input}"))?;

            print!("{}", report.markdown);
            info!(
                quality_matches = report.quality_matches,
                codes = report.codes.len(),
                files = report.artifacts.len(),
                "Reports written"
            );
        }
        Commands::Tags { input } => {
            let records = load_records(&input)?;
            let tags = extract_tag_count(&records);
            info!(distinct_tags = tags.len(), "Tags counted");
            print!("{}", render_tag_table(&tags));
        }
        Commands::Top { input, k, code } => {
            let records = load_records(&input)?;
            let table = match code {
                Some(code) => render_top_k(filter_by_code(&records, &code), &code, k)?,
                None => render_top_k(&records, "all records", k)?,
            };
            print!("{table}");
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// Stdout carries only the markdown tables.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ufo_reports.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ufo_reports.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
