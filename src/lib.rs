//! Tonesplit - calibration-tone audio segmentation CLI tool.
//!
//! Splits long mono recordings into labeled clips at the boundaries marked
//! by a recurring calibration tone (nominally 60 Hz).

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod labels;
pub mod output;
pub mod pipeline;
pub mod sorter;

use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{Cli, Command, SplitArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use labels::{LabelFile, LabelSource, ScriptLogExtractor, write_label_list};
use pipeline::{SplitOptions, split_file};
use sorter::{KeywordClassifier, organize_clips};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the tonesplit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.split.verbose, cli.split.quiet);

    // Load configuration (validated on load)
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Default: split recordings
    if cli.inputs.is_empty() {
        use clap::CommandFactory;
        let mut command = Cli::command();
        command.print_help()?;
        std::process::exit(0);
    }

    split_inputs(&cli.inputs, &cli.split, &config)
}

/// Split input recordings with the given options.
fn split_inputs(inputs: &[PathBuf], args: &SplitArgs, config: &Config) -> Result<()> {
    let opts = resolve_options(args, config);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());

    // Load labels once; they apply positionally to every recording's
    // segments.
    let labels = match &args.labels {
        Some(path) => LabelFile::new(path.clone()).labels()?,
        None => Vec::new(),
    };

    let mut processed = 0;
    let mut errors = 0;
    let mut total_markers = 0;
    let mut total_written = 0;
    let mut total_failed = 0;

    for input in inputs {
        let file_output_dir = output_dir_for(input, inputs.len(), &output_dir);

        match split_file(input, &file_output_dir, &labels, &opts) {
            Ok(outcome) => {
                processed += 1;
                total_markers += outcome.markers;
                total_written += outcome.report.written.len();
                total_failed += outcome.report.failed.len();
                for failed in &outcome.report.failed {
                    warn!("segment {} of {} failed: {}", failed.index, input.display(), failed.error);
                }
            }
            Err(e) => {
                error!("Failed to split {}: {e}", input.display());
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Complete: {} recording(s) split, {} marker(s), {} segment(s) written, {} failed",
        processed, total_markers, total_written, total_failed
    );

    if errors > 0 {
        warn!("{errors} recording(s) had errors");
    }

    Ok(())
}

/// Per-recording output directory.
///
/// A single input writes directly into the output directory; multiple
/// inputs each get a subdirectory named after the recording so ordinals
/// cannot collide.
fn output_dir_for(input: &Path, input_count: usize, output_dir: &Path) -> PathBuf {
    if input_count <= 1 {
        return output_dir.to_path_buf();
    }
    let stem = input
        .file_stem()
        .map_or_else(|| "recording".into(), std::ffi::OsStr::to_os_string);
    output_dir.join(stem)
}

/// Apply CLI overrides on top of configuration.
fn resolve_options(args: &SplitArgs, config: &Config) -> SplitOptions {
    let mut opts = SplitOptions::from_config(config);

    if let Some(freq) = args.freq_target {
        opts.scan.tone.freq_target = freq;
    }
    if let Some(tolerance) = args.tolerance {
        opts.scan.tone.tolerance = tolerance;
    }
    if let Some(ratio) = args.dominance_ratio {
        opts.scan.tone.dominance_ratio = ratio;
    }
    if let Some(duration) = args.tone_duration {
        opts.scan.tone_duration = duration;
    }
    if let Some(step) = args.step_duration {
        opts.scan.step_duration = step;
    }
    if let Some(policy) = args.policy {
        opts.policy = policy;
    }
    if let Some(min_duration) = args.min_duration {
        opts.resolve.min_segment_duration = min_duration;
    }
    if let Some(pad) = args.pad {
        opts.resolve.pad_duration = pad;
    }
    if let Some(threshold) = args.rms_threshold {
        opts.resolve.rms_threshold = threshold;
    }
    if let Some(label_policy) = args.label_policy {
        opts.label_policy = label_policy;
    }
    opts.progress = !args.quiet && !args.no_progress;

    opts
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Labels {
            script,
            output,
            marker,
        } => handle_labels_command(&script, output.as_deref(), marker.as_deref()),
        Command::Organize {
            source,
            keywords,
            base_dir,
        } => handle_organize_command(&source, keywords, base_dir.as_deref()),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Handle the `labels` command: extract action names from a script log.
fn handle_labels_command(
    script: &Path,
    output: Option<&Path>,
    marker: Option<&str>,
) -> Result<()> {
    let marker = marker.unwrap_or(constants::labels::DEFAULT_MARKER_PHRASE);
    let extractor = ScriptLogExtractor::new(script.to_path_buf(), marker.to_string());
    let labels = extractor.labels()?;

    let default_output = PathBuf::from(constants::labels::DEFAULT_LIST_FILE);
    let output = output.unwrap_or(&default_output);
    write_label_list(&labels, output)?;

    println!(
        "Extracted {} label(s) from {} to {}",
        labels.len(),
        script.display(),
        output.display()
    );
    Ok(())
}

/// Handle the `organize` command: sort clips into keyword directories.
fn handle_organize_command(
    source: &Path,
    keywords: Vec<String>,
    base_dir: Option<&Path>,
) -> Result<()> {
    let base = base_dir.map_or_else(
        || source.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        Path::to_path_buf,
    );

    let classifier = KeywordClassifier::new(keywords);
    let summary = organize_clips(source, &base, &classifier)?;

    println!(
        "Organized {}: {} copied, {} unmatched, {} failed",
        source.display(),
        summary.copied,
        summary.unmatched,
        summary.failed
    );
    Ok(())
}
