use crate::domain::errors::DataError;
use crate::domain::pricing::dataset::Dataset;
use crate::domain::pricing::observation::{Observation, Season};
use rand::SeedableRng;
use rand::distr::Bernoulli;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution, Normal};
use tracing::{debug, info};

/// Ground-truth pricing rule used to label synthetic rows (noise excluded):
/// `competitor_price * competitor_weight + base_margin
///  + (demand_index - demand_pivot) * demand_weight + season * season_premium`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceFormula {
    pub competitor_weight: f64,
    pub base_margin: f64,
    pub demand_pivot: f64,
    pub demand_weight: f64,
    pub season_premium: f64,
}

impl Default for PriceFormula {
    fn default() -> Self {
        Self {
            competitor_weight: 0.9,
            base_margin: 10.0,
            demand_pivot: 0.5,
            demand_weight: 40.0,
            season_premium: 8.0,
        }
    }
}

impl PriceFormula {
    pub fn price(&self, demand_index: f64, competitor_price: f64, seasonality: Season) -> f64 {
        competitor_price * self.competitor_weight
            + self.base_margin
            + (demand_index - self.demand_pivot) * self.demand_weight
            + seasonality.as_feature() * self.season_premium
    }

    /// Intercept of the formula once expanded to `intercept + w . features`
    pub fn intercept(&self) -> f64 {
        self.base_margin - self.demand_pivot * self.demand_weight
    }
}

/// Distribution parameters of the synthetic table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    pub n_samples: usize,
    pub seed: u64,
    pub demand_alpha: f64,
    pub demand_beta: f64,
    pub demand_min: f64,
    pub demand_max: f64,
    pub competitor_mean: f64,
    pub competitor_std: f64,
    pub high_season_probability: f64,
    pub noise_std: f64,
    pub formula: PriceFormula,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            n_samples: 500,
            seed: 0,
            demand_alpha: 2.0,
            demand_beta: 2.0,
            demand_min: 0.05,
            demand_max: 0.99,
            competitor_mean: 100.0,
            competitor_std: 15.0,
            high_season_probability: 0.3,
            noise_std: 5.0,
            formula: PriceFormula::default(),
        }
    }
}

impl SynthesisParams {
    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generates the labeled pricing table from a single seeded generator.
///
/// Columns are drawn one after another (demand, competitor price, season, noise), so the
/// whole table is a pure function of `SynthesisParams`.
pub struct DatasetSynthesizer {
    params: SynthesisParams,
}

impl DatasetSynthesizer {
    pub fn new(params: SynthesisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SynthesisParams {
        &self.params
    }

    pub fn generate(&self) -> Result<Dataset, DataError> {
        let p = &self.params;
        let n = p.n_samples;
        if n == 0 {
            return Err(DataError::EmptyDataset);
        }

        let demand_dist = Beta::new(p.demand_alpha, p.demand_beta).map_err(|e| {
            DataError::InvalidDistribution {
                distribution: "beta",
                reason: e.to_string(),
            }
        })?;
        let competitor_dist = Normal::new(p.competitor_mean, p.competitor_std).map_err(|e| {
            DataError::InvalidDistribution {
                distribution: "normal",
                reason: e.to_string(),
            }
        })?;
        let season_dist = Bernoulli::new(p.high_season_probability).map_err(|e| {
            DataError::InvalidDistribution {
                distribution: "bernoulli",
                reason: e.to_string(),
            }
        })?;
        let noise_dist =
            Normal::new(0.0, p.noise_std).map_err(|e| DataError::InvalidDistribution {
                distribution: "noise",
                reason: e.to_string(),
            })?;

        let mut rng = StdRng::seed_from_u64(p.seed);

        let demand: Vec<f64> = (0..n)
            .map(|_| demand_dist.sample(&mut rng).clamp(p.demand_min, p.demand_max))
            .collect();
        // Negative tail values are kept as drawn
        let competitor: Vec<f64> = (0..n).map(|_| competitor_dist.sample(&mut rng)).collect();
        let seasons: Vec<Season> = (0..n)
            .map(|_| Season::from(season_dist.sample(&mut rng)))
            .collect();
        let noise: Vec<f64> = (0..n).map(|_| noise_dist.sample(&mut rng)).collect();

        let dataset: Dataset = (0..n)
            .map(|i| {
                let price = p.formula.price(demand[i], competitor[i], seasons[i]) + noise[i];
                Observation::new(demand[i], competitor[i], seasons[i], price)
            })
            .collect();

        let negative = competitor.iter().filter(|c| **c < 0.0).count();
        if negative > 0 {
            debug!("{} rows have a negative competitor price", negative);
        }
        info!(
            "Synthesized {} observations (seed={}, noise_std={})",
            dataset.len(),
            p.seed,
            p.noise_std
        );

        Ok(dataset)
    }
}
