//! CLI argument definitions.

use crate::engine::RefinePolicy;
use crate::output::LabelPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split long recordings into labeled clips at calibration-tone boundaries.
#[derive(Debug, Parser)]
#[command(name = "tonesplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input recordings to split.
    pub inputs: Vec<PathBuf>,

    /// Common options for splitting.
    #[command(flatten)]
    pub split: SplitArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Extract action labels from a script log file.
    Labels {
        /// Script file to scan for labeled actions.
        script: PathBuf,
        /// Output file for the label list (default: labels.txt).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Marker phrase preceding the quoted label.
        #[arg(long)]
        marker: Option<String>,
    },
    /// Sort written clips into keyword directories (copies, never moves).
    Organize {
        /// Directory containing the clips to sort.
        source: PathBuf,
        /// Ordered keyword list; first match wins.
        #[arg(short, long, value_delimiter = ',', required = true)]
        keywords: Vec<String>,
        /// Base directory for keyword subdirectories (default: source's parent).
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the split command.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Output directory for segment files.
    #[arg(short, long, env = "TONESPLIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the action label list (one label per line).
    #[arg(short, long, env = "TONESPLIT_LABELS")]
    pub labels: Option<PathBuf>,

    /// Boundary refinement policy.
    #[arg(long, value_enum)]
    pub policy: Option<RefinePolicy>,

    /// Label reconciliation policy.
    #[arg(long, value_enum)]
    pub label_policy: Option<LabelPolicy>,

    /// Target tone frequency in Hz.
    #[arg(long, value_parser = parse_positive, env = "TONESPLIT_FREQ_TARGET")]
    pub freq_target: Option<f64>,

    /// Frequency tolerance around the target in Hz.
    #[arg(long, value_parser = parse_non_negative)]
    pub tolerance: Option<f64>,

    /// Band dominance ratio threshold (0.0-1.0 exclusive).
    #[arg(long, value_parser = parse_ratio, env = "TONESPLIT_DOMINANCE_RATIO")]
    pub dominance_ratio: Option<f64>,

    /// Scan window length in seconds.
    #[arg(long, value_parser = parse_positive)]
    pub tone_duration: Option<f64>,

    /// Scan stride in seconds.
    #[arg(long, value_parser = parse_positive)]
    pub step_duration: Option<f64>,

    /// Minimum segment duration in seconds (padded policy).
    #[arg(long, value_parser = parse_non_negative)]
    pub min_duration: Option<f64>,

    /// Silence guard band in seconds (padded policy).
    #[arg(long, value_parser = parse_non_negative)]
    pub pad: Option<f64>,

    /// Silence RMS threshold in raw 16-bit amplitude units.
    #[arg(long, value_parser = parse_non_negative)]
    pub rms_threshold: Option<f64>,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar without reducing log output.
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate a strictly positive value.
fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value <= 0.0 {
        return Err(format!("value must be positive, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a non-negative value.
fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value < 0.0 {
        return Err(format!("value must be non-negative, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a ratio strictly between 0 and 1.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(value > 0.0 && value < 1.0) {
        return Err(format!(
            "ratio must be between 0.0 and 1.0 exclusive, got {value}"
        ));
    }

    Ok(value)
}
