//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - sets up logging
//! - builds the dataset (sampled or from CSV) and rates it
//! - prints tables and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{ClassifyArgs, Command, OutputArgs, RateArgs, SampleArgs};
use crate::domain::{RunConfig, SampleConfig, Source};
use crate::error::AppError;
use crate::io::{ExportTable, export, write_summary_json};
use crate::rating::Classifier;

pub mod pipeline;

/// Entry point for the `ratings` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; it only supplies defaults for `env = ...` flags.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::Sample(args) => handle_run(&run_config_from_sample_args(&args)),
        Command::Rate(args) => handle_run(&run_config_from_rate_args(&args)),
        Command::Classify(args) => handle_classify(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(config: &RunConfig) -> Result<(), AppError> {
    let run = pipeline::run(config)?;

    println!("{}", crate::report::format_numeric_table(run.dataset.rows(), config.head));
    println!("{}", crate::report::format_rated_table(&run.rated, config.head));
    println!();
    println!("{}", crate::report::format_summary(&run.summary));

    if !run.row_errors.is_empty() {
        eprintln!("Skipped {} invalid row(s).", run.row_errors.len());
    }

    // Optional exports.
    if let Some(path) = &config.export_numeric {
        export(ExportTable::Numeric(run.dataset.rows()), path)?;
    }
    if let Some(path) = &config.export_rated {
        export(ExportTable::Rated(&run.rated), path)?;
    }
    if let Some(path) = &config.export_summary {
        write_summary_json(path, &run.summary)?;
    }

    Ok(())
}

fn handle_classify(args: &ClassifyArgs) -> Result<(), AppError> {
    if !args.score.is_finite() {
        return Err(AppError::new(2, format!("Score must be a finite number (got {}).", args.score)));
    }
    let classifier = Classifier::new(args.total_domain)?;
    let max = classifier.domain_max(args.column);
    if !(0.0..=max).contains(&args.score) {
        tracing::warn!(score = args.score, max, "score outside [0, max]; using the nearest bucket");
    }

    println!("{}", classifier.classify(args.column, args.score));
    Ok(())
}

pub fn run_config_from_sample_args(args: &SampleArgs) -> RunConfig {
    run_config(
        Source::Sample(SampleConfig {
            count: args.count,
            seed: args.seed,
            decimals: args.decimals,
        }),
        &args.output,
    )
}

pub fn run_config_from_rate_args(args: &RateArgs) -> RunConfig {
    run_config(
        Source::Csv {
            path: args.csv.clone(),
            skip_invalid: args.skip_invalid,
        },
        &args.output,
    )
}

fn run_config(source: Source, output: &OutputArgs) -> RunConfig {
    RunConfig {
        source,
        total_domain: output.total_domain,
        head: output.head,
        export_numeric: output.export.clone(),
        export_rated: output.export_rated.clone(),
        export_summary: output.export_summary.clone(),
    }
}

/// Rewrite argv so `ratings` defaults to `ratings sample`.
///
/// Rules:
/// - `ratings`                      -> `ratings sample`
/// - `ratings -n 10 ...`            -> `ratings sample -n 10 ...`
/// - `ratings --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sample".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "sample" | "rate" | "classify");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "sample flags".
    if arg1.starts_with('-') {
        argv.insert(1, "sample".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
