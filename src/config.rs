pub use crate::application::ml::smartcore_regressor::RegressionSolver;
use crate::application::ml::data_synthesizer::SynthesisParams;
use crate::application::ml::trainer::{MIN_TRAINING_ROWS, TrainingParams};
use crate::domain::pricing::policy::{DEFAULT_MARKUP_LIMIT, PricingPolicy};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Run configuration of the pricing pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub sample_count: usize,
    pub data_seed: u64,
    pub test_size: f64,
    pub split_seed: u64,
    pub solver: RegressionSolver,
    pub markup_limit: f64,
    pub floor_price: Option<f64>,
    pub ceiling_price: Option<f64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            sample_count: 500,
            data_seed: 0,
            test_size: 0.2,
            split_seed: 42,
            solver: RegressionSolver::default(),
            markup_limit: DEFAULT_MARKUP_LIMIT,
            floor_price: None,
            ceiling_price: None,
        }
    }
}

fn parse_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .map_err(Into::<anyhow::Error>::into)
                .with_context(|| format!("Failed to parse {}={}", key, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl PricingConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let sample_count = parse_var("SAMPLE_COUNT")?.unwrap_or(defaults.sample_count);
        let data_seed = parse_var("DATA_SEED")?.unwrap_or(defaults.data_seed);
        let test_size = parse_var("TEST_SIZE")?.unwrap_or(defaults.test_size);
        let split_seed = parse_var("SPLIT_SEED")?.unwrap_or(defaults.split_seed);

        let solver = parse_var("REGRESSION_SOLVER")?.unwrap_or(defaults.solver);

        let markup_limit = parse_var("MARKUP_LIMIT")?.unwrap_or(defaults.markup_limit);
        let floor_price = parse_var("FLOOR_PRICE")?;
        let ceiling_price = parse_var("CEILING_PRICE")?;

        let config = Self {
            sample_count,
            data_seed,
            test_size,
            split_seed,
            solver,
            markup_limit,
            floor_price,
            ceiling_price,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the pipeline cannot run with.
    /// A floor above the ceiling is accepted: the ceiling wins when prices are clamped.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < MIN_TRAINING_ROWS {
            anyhow::bail!(
                "SAMPLE_COUNT must be at least {}, got {}",
                MIN_TRAINING_ROWS,
                self.sample_count
            );
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            anyhow::bail!("TEST_SIZE must be in (0, 1), got {}", self.test_size);
        }
        if !self.markup_limit.is_finite() || self.markup_limit < 0.0 {
            anyhow::bail!(
                "MARKUP_LIMIT must be a non-negative number, got {}",
                self.markup_limit
            );
        }
        Ok(())
    }

    pub fn synthesis_params(&self) -> SynthesisParams {
        SynthesisParams::default()
            .with_samples(self.sample_count)
            .with_seed(self.data_seed)
    }

    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            test_size: self.test_size,
            split_seed: self.split_seed,
        }
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            markup_limit: self.markup_limit,
            floor_price: self.floor_price,
            ceiling_price: self.ceiling_price,
        }
    }
}
