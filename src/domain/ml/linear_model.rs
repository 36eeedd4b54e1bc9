use serde::{Deserialize, Serialize};

use super::feature_registry::{self, FEATURE_COUNT};
use crate::domain::pricing::observation::Season;

/// Frozen linear pricing model: `price = intercept + sum(weights[i] * feature[i])`.
///
/// Built once from a fitted regressor and only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Weights in `FEATURE_NAMES` order
    pub weights: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn predict_row(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        self.weights
            .iter()
            .zip(row.iter())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }

    pub fn predict(&self, demand_index: f64, competitor_price: f64, seasonality: Season) -> f64 {
        self.predict_row(&feature_registry::to_feature_row(
            demand_index,
            competitor_price,
            seasonality,
        ))
    }

    /// Weights labeled with their feature names
    pub fn coefficients(&self) -> Vec<(&'static str, f64)> {
        feature_registry::label_features(&self.weights)
    }
}
