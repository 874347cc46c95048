//! Command-line parsing for the path rating tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the rating engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Column;
use crate::rating::DEFAULT_TOTAL_DOMAIN;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ratings", version, about = "Bike path rating classifier")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate random sample rows and print them with their ratings.
    ///
    /// This is the default when no subcommand is given.
    Sample(SampleArgs),
    /// Rate rows loaded from a CSV file.
    Rate(RateArgs),
    /// Print the label for a single score.
    Classify(ClassifyArgs),
}

/// Options shared by every command that builds a dataset.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Upper bound of the domain used to bucket the Total Score.
    #[arg(long, env = "RATINGS_TOTAL_DOMAIN", default_value_t = DEFAULT_TOTAL_DOMAIN)]
    pub total_domain: f64,

    /// Rows shown in terminal tables (0 = all).
    #[arg(long, default_value_t = 5)]
    pub head: usize,

    /// Export the numeric table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the rated table to CSV.
    #[arg(long = "export-rated")]
    pub export_rated: Option<PathBuf>,

    /// Export the average row and its ratings to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Number of rows to generate.
    #[arg(short = 'n', long, env = "RATINGS_SAMPLE_COUNT", default_value_t = 3)]
    pub count: usize,

    /// Random seed; omit for a fresh sample each run.
    #[arg(long, env = "RATINGS_SEED")]
    pub seed: Option<u64>,

    /// Decimal places kept on generated scores.
    #[arg(long, default_value_t = 3)]
    pub decimals: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RateArgs {
    /// CSV with one column per attribute.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Skip invalid rows instead of stopping at the first one.
    #[arg(long)]
    pub skip_invalid: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    /// Column the score belongs to.
    #[arg(value_enum)]
    pub column: Column,

    /// Raw score.
    #[arg(allow_negative_numbers = true)]
    pub score: f64,

    /// Upper bound of the domain used to bucket the Total Score.
    #[arg(long, env = "RATINGS_TOTAL_DOMAIN", default_value_t = DEFAULT_TOTAL_DOMAIN)]
    pub total_domain: f64,
}
