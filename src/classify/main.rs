//! Batch province classifier.
//!
//! Reads `sample_id<TAB>latitude<TAB>longitude` rows and writes each row
//! back with the code and name of the Longhurst province containing it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use longhurst::batch::{BatchRunner, LineTerminator, MalformedRowPolicy};
use longhurst::config::ClassifierConfig;
use longhurst::pip::{ClassifierService, CrossingMode};
use longhurst::source::load_catalog;

#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(about = "Assign coordinates to Longhurst provinces")]
struct Args {
    /// Tab-separated input: sample id, latitude, longitude
    input: PathBuf,

    /// Tab-separated output file
    output: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Province catalog (.xml/.gml or .json, optionally .gz)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Membership rule
    #[arg(long, value_enum)]
    mode: Option<CrossingMode>,

    /// Skip rows that do not parse instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Classify rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Terminate output rows with LF instead of CRLF
    #[arg(long)]
    lf: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ClassifierConfig> {
        let mut config = match &self.config {
            Some(path) => ClassifierConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClassifierConfig::default(),
        };

        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.skip_malformed {
            config.on_malformed_row = MalformedRowPolicy::Skip;
        }
        if self.parallel {
            config.parallel = true;
        }
        if self.lf {
            config.line_terminator = LineTerminator::Lf;
        }

        Ok(config)
    }

    /// Directive used when `RUST_LOG` is unset
    fn default_log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_directive()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.resolve_config()?;

    info!("Longhurst classifier");
    info!("Catalog: {} ({} mode)", config.catalog.display(), config.mode);

    // Loaded once, shared read-only by every row
    let catalog = load_catalog(&config.catalog)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.display()))?;
    let service = ClassifierService::new(catalog, config.mode);

    let mut runner = BatchRunner::new(&service, config.batch_options());
    if args.progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({per_sec})")?
                .progress_chars("#>-"),
        );
        runner = runner.with_progress(pb);
    }

    let summary = runner
        .run_files(&args.input, &args.output)
        .with_context(|| format!("Failed to classify {}", args.input.display()))?;

    info!(
        "Wrote {} rows to {} ({} skipped)",
        summary.classified,
        args.output.display(),
        summary.skipped
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals_only() {
        let args = Args::try_parse_from(["classify", "in.tsv", "out.tsv"]).unwrap();
        let config = args.resolve_config().unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(args.input, PathBuf::from("in.tsv"));
    }

    #[test]
    fn test_flags_override() {
        let args = Args::try_parse_from([
            "classify",
            "in.tsv",
            "out.tsv",
            "--catalog",
            "regions.json",
            "--mode",
            "exact",
            "--skip-malformed",
            "--parallel",
            "--lf",
        ])
        .unwrap();
        let config = args.resolve_config().unwrap();
        assert_eq!(config.catalog, PathBuf::from("regions.json"));
        assert_eq!(config.mode, CrossingMode::Exact);
        assert_eq!(config.on_malformed_row, MalformedRowPolicy::Skip);
        assert!(config.parallel);
        assert_eq!(config.line_terminator, LineTerminator::Lf);
    }

    #[test]
    fn test_verbose_selects_debug_logging() {
        let quiet = Args::try_parse_from(["classify", "in.tsv", "out.tsv"]).unwrap();
        assert_eq!(quiet.default_log_directive(), "info");

        let verbose = Args::try_parse_from(["classify", "-v", "in.tsv", "out.tsv"]).unwrap();
        assert_eq!(verbose.default_log_directive(), "debug");
        assert!(EnvFilter::try_new(verbose.default_log_directive()).is_ok());
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Args::try_parse_from(["classify", "in.tsv"]).is_err());
    }
}
