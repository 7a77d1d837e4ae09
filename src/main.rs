//! Imbalanced Stream Learning CLI
//!
//! Runs progressive validation of an online fraud-detection pipeline over an
//! imbalanced stream, with or without class rebalancing.

use clap::{Args, Parser, Subcommand};
use imbalanced_learning::evaluate::progressive_val_score;
use imbalanced_learning::metrics::RocAuc;
use imbalanced_learning::models::{Label, LogisticRegression};
use imbalanced_learning::pipeline::Pipeline;
use imbalanced_learning::preprocessing::StandardScaler;
use imbalanced_learning::sampling::{RandomOverSampler, RandomSampler, RandomUnderSampler};
use imbalanced_learning::stream::{read_csv, Observation, SyntheticStream};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "imbalanced_learning")]
#[command(about = "Online Learning on Imbalanced Classification Streams")]
struct Cli {
    /// Emit the final report as JSON instead of log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Observation stream options shared by all strategies
#[derive(Args)]
struct StreamArgs {
    /// CSV file with labeled observations; synthetic stream when omitted
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Label column name for CSV input
    #[arg(long, default_value = "class")]
    label_column: String,

    /// Number of synthetic observations to generate
    #[arg(short, long, default_value = "100000")]
    examples: usize,

    /// Positive-class rate of the synthetic stream
    #[arg(short, long, default_value = "0.01")]
    positive_rate: f64,

    /// Seed for the stream and the sampling decisions
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Learning rate of the logistic regression
    #[arg(short, long, default_value = "0.05")]
    lr: f64,

    /// Log the running metric every N observations (0 disables)
    #[arg(long, default_value = "10000")]
    report_every: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the raw stream without rebalancing
    Baseline {
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Under-sample the majority class towards a desired distribution
    UnderSample {
        #[command(flatten)]
        stream: StreamArgs,

        /// Desired share of the minority (positive) class
        #[arg(short, long, default_value = "0.2")]
        minority_share: f64,
    },

    /// Over-sample the minority class towards a desired distribution
    OverSample {
        #[command(flatten)]
        stream: StreamArgs,

        /// Desired share of the minority (positive) class
        #[arg(short, long, default_value = "0.2")]
        minority_share: f64,
    },

    /// Combined under/over-sampling with a global sampling rate
    Hybrid {
        #[command(flatten)]
        stream: StreamArgs,

        /// Desired share of the minority (positive) class
        #[arg(short, long, default_value = "0.2")]
        minority_share: f64,

        /// Fraction of the rebalanced stream used for training
        #[arg(long, default_value = "0.5")]
        sampling_rate: f64,
    },
}

/// Final report emitted after a run
#[derive(Serialize)]
struct RunReport {
    strategy: &'static str,
    examples: usize,
    roc_auc: f64,
    /// Training updates that reached the classifier, when a sampler is used
    #[serde(skip_serializing_if = "Option::is_none")]
    training_updates: Option<u64>,
}

fn load_observations(args: &StreamArgs) -> anyhow::Result<Vec<Observation>> {
    match &args.csv {
        Some(path) => {
            info!("Loading observations from {}", path.display());
            let observations = read_csv(path, &args.label_column)?;
            info!("Loaded {} observations", observations.len());
            Ok(observations)
        }
        None => {
            info!(
                "Generating {} synthetic observations (positive rate {})",
                args.examples, args.positive_rate
            );
            let stream = SyntheticStream::new(args.positive_rate, 5, args.seed)?;
            Ok(stream.take(args.examples).collect())
        }
    }
}

fn fraud_pipeline(lr: f64) -> Pipeline<LogisticRegression> {
    Pipeline::new(LogisticRegression::new(lr)).with_stage(StandardScaler::new())
}

fn desired_dist(minority_share: f64) -> HashMap<Label, f64> {
    HashMap::from([(0, 1.0 - minority_share), (1, minority_share)])
}

fn emit(report: RunReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("Strategy: {}", report.strategy);
        info!("Observations: {}", report.examples);
        info!("ROC AUC: {:.4}", report.roc_auc);
        if let Some(updates) = report.training_updates {
            info!("Training updates: {}", updates);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Baseline { stream } => {
            let observations = load_observations(&stream)?;
            let n = observations.len();
            let mut model = fraud_pipeline(stream.lr);
            let mut metric = RocAuc::default();

            let auc =
                progressive_val_score(observations, &mut model, &mut metric, stream.report_every)?;

            emit(
                RunReport {
                    strategy: "baseline",
                    examples: n,
                    roc_auc: auc,
                    training_updates: None,
                },
                cli.json,
            )?;
        }

        Commands::UnderSample {
            stream,
            minority_share,
        } => {
            let observations = load_observations(&stream)?;
            let n = observations.len();
            let mut model = RandomUnderSampler::new(
                fraud_pipeline(stream.lr),
                desired_dist(minority_share),
                stream.seed,
            )?;
            let mut metric = RocAuc::default();

            let auc =
                progressive_val_score(observations, &mut model, &mut metric, stream.report_every)?;

            info!(
                "Forwarded {} of {} observations for training",
                model.n_forwarded(),
                model.samples_seen()
            );
            emit(
                RunReport {
                    strategy: "under-sample",
                    examples: n,
                    roc_auc: auc,
                    training_updates: Some(model.n_forwarded()),
                },
                cli.json,
            )?;
        }

        Commands::OverSample {
            stream,
            minority_share,
        } => {
            let observations = load_observations(&stream)?;
            let n = observations.len();
            let mut model = RandomOverSampler::new(
                fraud_pipeline(stream.lr),
                desired_dist(minority_share),
                stream.seed,
            )?;
            let mut metric = RocAuc::default();

            let auc =
                progressive_val_score(observations, &mut model, &mut metric, stream.report_every)?;

            info!(
                "Performed {} training updates from {} observations",
                model.n_updates(),
                model.samples_seen()
            );
            emit(
                RunReport {
                    strategy: "over-sample",
                    examples: n,
                    roc_auc: auc,
                    training_updates: Some(model.n_updates()),
                },
                cli.json,
            )?;
        }

        Commands::Hybrid {
            stream,
            minority_share,
            sampling_rate,
        } => {
            let observations = load_observations(&stream)?;
            let n = observations.len();
            let mut model = RandomSampler::new(
                fraud_pipeline(stream.lr),
                desired_dist(minority_share),
                sampling_rate,
                stream.seed,
            )?;
            let mut metric = RocAuc::default();

            let auc =
                progressive_val_score(observations, &mut model, &mut metric, stream.report_every)?;

            info!(
                "Performed {} training updates from {} observations",
                model.n_updates(),
                model.samples_seen()
            );
            emit(
                RunReport {
                    strategy: "hybrid",
                    examples: n,
                    roc_auc: auc,
                    training_updates: Some(model.n_updates()),
                },
                cli.json,
            )?;
        }
    }

    Ok(())
}
