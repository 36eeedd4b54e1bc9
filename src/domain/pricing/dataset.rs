use serde::Serialize;
use statrs::statistics::{Data, Distribution, Max, Min};

use super::observation::Observation;

/// Immutable table of synthesized observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Observation>,
}

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(values: Vec<f64>) -> Self {
        let data = Data::new(values);
        Self {
            mean: data.mean().unwrap_or(f64::NAN),
            std_dev: data.std_dev().unwrap_or(f64::NAN),
            min: data.min(),
            max: data.max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub demand_index: ColumnStats,
    pub competitor_price: ColumnStats,
    pub observed_price: ColumnStats,
    /// Fraction of rows flagged as high season
    pub high_season_share: f64,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    /// Feature matrix, one row per observation
    pub fn features(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|o| o.features().to_vec()).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.rows.iter().map(|o| o.observed_price).collect()
    }

    /// Builds a new table from the rows at `indices`, in that order.
    /// Indices out of range are skipped.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        indices
            .iter()
            .filter_map(|&i| self.rows.get(i).copied())
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        let column = |f: fn(&Observation) -> f64| {
            ColumnStats::from_values(self.rows.iter().map(f).collect())
        };

        let high = self.rows.iter().filter(|o| o.seasonality.is_high()).count();
        let high_season_share = if self.rows.is_empty() {
            0.0
        } else {
            high as f64 / self.rows.len() as f64
        };

        DatasetSummary {
            rows: self.rows.len(),
            demand_index: column(|o| o.demand_index),
            competitor_price: column(|o| o.competitor_price),
            observed_price: column(|o| o.observed_price),
            high_season_share,
        }
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
