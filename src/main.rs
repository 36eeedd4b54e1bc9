//! Pricewise - synthesize, train, suggest
//!
//! Generates a synthetic pricing table, fits a linear model on it and prints bounded price
//! suggestions for a handful of queries.
//!
//! # Usage
//! ```sh
//! cargo run -- --samples 500 --seed 0 --query 0.5,110,0 --floor 100
//! RUST_LOG=debug cargo run -- --json
//! ```
//!
//! Every flag falls back to the matching environment variable (see `PricingConfig::from_env`).

use anyhow::Result;
use clap::Parser;
use pricewise::application::ml::data_synthesizer::DatasetSynthesizer;
use pricewise::application::ml::dataset_export;
use pricewise::application::ml::smartcore_regressor::SmartcoreLinearRegressor;
use pricewise::application::ml::trainer::{ModelTrainer, TrainingReport};
use pricewise::application::pricing::advisor::{PriceAdvisor, PriceQuery};
use pricewise::config::{PricingConfig, RegressionSolver};
use pricewise::domain::pricing::policy::PriceSuggestion;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of synthetic observations
    #[arg(long)]
    samples: Option<usize>,

    /// Seed of the data generator
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_size: Option<f64>,

    /// Seed of the train/test partition
    #[arg(long)]
    split_seed: Option<u64>,

    /// Least-squares solver (qr or svd)
    #[arg(long)]
    solver: Option<RegressionSolver>,

    /// Maximum markup over the competitor price (0.25 = 25%)
    #[arg(long)]
    markup_limit: Option<f64>,

    /// Minimum suggested price
    #[arg(long)]
    floor: Option<f64>,

    /// Maximum suggested price (applied after the floor)
    #[arg(long)]
    ceiling: Option<f64>,

    /// Query as demand,competitor_price,season (repeatable). Defaults to the built-in examples.
    #[arg(long = "query", value_name = "D,C,S")]
    queries: Vec<PriceQuery>,

    /// Write the synthesized table to this CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, mut config: PricingConfig) -> Result<PricingConfig> {
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(seed) = self.seed {
            config.data_seed = seed;
        }
        if let Some(test_size) = self.test_size {
            config.test_size = test_size;
        }
        if let Some(split_seed) = self.split_seed {
            config.split_seed = split_seed;
        }
        if let Some(solver) = self.solver {
            config.solver = solver;
        }
        if let Some(markup_limit) = self.markup_limit {
            config.markup_limit = markup_limit;
        }
        if self.floor.is_some() {
            config.floor_price = self.floor;
        }
        if self.ceiling.is_some() {
            config.ceiling_price = self.ceiling;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct SuggestionLine {
    query: PriceQuery,
    suggestion: PriceSuggestion,
}

#[derive(Serialize)]
struct RunReport<'a> {
    training: &'a TrainingReport,
    suggestions: Vec<SuggestionLine>,
}

fn print_text_report(report: &TrainingReport) {
    println!("MAE: {}", report.mae);
    let coefficients: Vec<String> = report
        .coefficients
        .iter()
        .map(|c| format!("{}: {}", c.feature, c.weight))
        .collect();
    println!("Coefficients: {{{}}}", coefficients.join(", "));
    println!("Intercept: {}", report.intercept);
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the report
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(stderr_layer)
        .init();

    let args = Args::parse();
    let config = args.apply(PricingConfig::from_env()?)?;
    info!(
        "Configuration loaded: samples={}, seed={}, test_size={}, split_seed={}, solver={}",
        config.sample_count, config.data_seed, config.test_size, config.split_seed, config.solver
    );

    // 1. Synthesize
    let dataset = DatasetSynthesizer::new(config.synthesis_params()).generate()?;
    let summary = dataset.summary();
    info!(
        "Dataset: demand mean={:.3}, competitor mean={:.2} (sd {:.2}), price mean={:.2}, high season={:.1}%",
        summary.demand_index.mean,
        summary.competitor_price.mean,
        summary.competitor_price.std_dev,
        summary.observed_price.mean,
        summary.high_season_share * 100.0
    );

    if let Some(path) = &args.export_csv {
        dataset_export::export_csv(&dataset, path)?;
    }

    // 2. Train
    let trainer = ModelTrainer::new(
        SmartcoreLinearRegressor::new(config.solver),
        config.training_params(),
    );
    let trained = trainer.train(&dataset)?;

    // 3. Advise
    let advisor = PriceAdvisor::new(trained.model).with_policy(config.pricing_policy());
    let queries = if args.queries.is_empty() {
        PriceQuery::default_examples()
    } else {
        args.queries.clone()
    };

    if args.json {
        let suggestions = queries
            .iter()
            .map(|q| SuggestionLine {
                query: *q,
                suggestion: advisor.explain(q),
            })
            .collect();
        let report = RunReport {
            training: &trained.report,
            suggestions,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_text_report(&trained.report);
    for query in &queries {
        println!("{}", query.report_line(advisor.suggest(query)));
    }

    Ok(())
}
