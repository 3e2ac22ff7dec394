//! rperceptron Command Line Interface
//!
//! Reads labeled named-feature lines, trains an averaged perceptron on the
//! leading part of the input and prints train/test accuracy per epoch.

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use rperceptron::api::{evaluate_detailed, Trainer};
use rperceptron::core::{Result, SplitBoundary};
use rperceptron::FeatureDataset;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rperceptron")]
#[command(about = "Train an averaged perceptron on sparse named features")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "rperceptron contributors")]
struct Cli {
    /// Input data file (reads standard input if not specified)
    input: Option<PathBuf>,

    /// Number of training epochs
    #[arg(short, long, default_value = "10")]
    epochs: usize,

    /// Fraction of instances used for training
    #[arg(short = 'r', long, default_value = "0.8")]
    train_ratio: f64,

    /// Treatment of the instance at the train/test boundary
    #[arg(long, default_value = "skip-one")]
    split_boundary: CliSplitBoundary,

    /// Print confusion-matrix metrics for the test split after training
    #[arg(long)]
    detailed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliSplitBoundary {
    /// Leave out the first instance after the training part
    #[value(name = "skip-one")]
    SkipOne,
    /// Test on everything after the training part
    #[value(name = "contiguous")]
    Contiguous,
}

impl From<CliSplitBoundary> for SplitBoundary {
    fn from(cli_boundary: CliSplitBoundary) -> Self {
        match cli_boundary {
            CliSplitBoundary::SkipOne => SplitBoundary::SkipOne,
            CliSplitBoundary::Contiguous => SplitBoundary::Contiguous,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let trainer = Trainer::new()
        .with_epochs(cli.epochs)
        .with_train_ratio(cli.train_ratio)
        .with_split_boundary(cli.split_boundary.into());
    trainer.config().validate()?;

    let dataset = match &cli.input {
        Some(path) => {
            info!("Data file: {path:?}");
            FeatureDataset::from_file(path)?
        }
        None => {
            info!("Reading data from standard input");
            FeatureDataset::from_reader(io::stdin().lock())
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_result = Ok(());
    let report = trainer.train(&dataset, |epoch| {
        if write_result.is_ok() {
            write_result = writeln!(out, "{epoch}").and_then(|_| out.flush());
        }
    })?;
    write_result?;

    if cli.detailed {
        let (_, test) = dataset.split(trainer.config().train_ratio, trainer.config().split_boundary);
        let metrics = evaluate_detailed(&report.model, test);

        writeln!(out, "=== Test Split Metrics ===")?;
        writeln!(out, "Instances: {}", metrics.total())?;
        writeln!(out, "Accuracy: {:.3}", metrics.accuracy())?;
        writeln!(out, "Precision: {:.3}", metrics.precision())?;
        writeln!(out, "Recall: {:.3}", metrics.recall())?;
        writeln!(out, "F1 score: {:.3}", metrics.f1_score())?;
        writeln!(out, "Specificity: {:.3}", metrics.specificity())?;
        writeln!(
            out,
            "TP={} TN={} FP={} FN={}",
            metrics.true_positives,
            metrics.true_negatives,
            metrics.false_positives,
            metrics.false_negatives
        )?;
    }

    info!(
        "Finished after {} updates over {} features",
        report.model.count() - 1,
        report.model.n_features()
    );

    Ok(())
}
