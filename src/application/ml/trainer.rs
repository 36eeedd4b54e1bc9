use super::regressor::{Regressor, freeze_linear};
use crate::domain::errors::DataError;
use crate::domain::ml::linear_model::LinearModel;
use crate::domain::pricing::dataset::Dataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use smartcore::metrics::{mean_absolute_error, mean_squared_error, r2};
use tracing::info;

/// Smallest table the trainer accepts
pub const MIN_TRAINING_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
    /// Seed of the train/test partition
    pub split_seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            split_seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Shuffles row indices with a seeded generator and holds out `ceil(n * test_size)` rows.
pub fn train_test_split(
    dataset: &Dataset,
    test_size: f64,
    seed: u64,
) -> Result<DatasetSplit, DataError> {
    let n = dataset.len();
    let n_test = (n as f64 * test_size).ceil();
    // Float-to-int casts saturate: NaN and negatives give 0, +inf gives usize::MAX
    let n_test = n_test as usize;

    if n_test == 0 {
        return Err(DataError::EmptySplit {
            split: "test",
            rows: n,
            test_size,
        });
    }
    if n_test >= n {
        return Err(DataError::EmptySplit {
            split: "train",
            rows: n,
            test_size,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok(DatasetSplit {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    })
}

/// Named weight of the fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
}

/// Evaluation results and fitted parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub regressor: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    pub coefficients: Vec<FeatureWeight>,
    pub intercept: f64,
}

/// Output of a training run: the frozen model plus how it scored
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedPricingModel {
    pub model: LinearModel,
    pub report: TrainingReport,
}

/// Splits, fits and evaluates a regressor once.
pub struct ModelTrainer<R: Regressor> {
    regressor: R,
    params: TrainingParams,
}

impl<R: Regressor> ModelTrainer<R> {
    pub fn new(regressor: R, params: TrainingParams) -> Self {
        Self { regressor, params }
    }

    pub fn train(mut self, dataset: &Dataset) -> Result<TrainedPricingModel, DataError> {
        if dataset.len() < MIN_TRAINING_ROWS {
            return Err(DataError::InsufficientRows {
                rows: dataset.len(),
                min: MIN_TRAINING_ROWS,
            });
        }

        let split = train_test_split(dataset, self.params.test_size, self.params.split_seed)?;
        info!(
            "Training {} on {} samples ({} held out, split_seed={})...",
            self.regressor.name(),
            split.train.len(),
            split.test.len(),
            self.params.split_seed
        );

        self.regressor
            .fit(&split.train.features(), &split.train.targets())?;

        let y_test = split.test.targets();
        let y_pred = self.regressor.predict(&split.test.features())?;
        if y_pred.len() != y_test.len() {
            return Err(DataError::ShapeMismatch {
                features: y_test.len(),
                targets: y_pred.len(),
            });
        }

        let mae = mean_absolute_error(&y_test, &y_pred);
        let rmse = mean_squared_error(&y_test, &y_pred).sqrt();
        let r_squared = r2(&y_test, &y_pred);

        let model = freeze_linear(&self.regressor)?;
        info!(
            "OOS Test (n={}): RMSE={:.4}, MAE={:.4}, R²={:.4}",
            y_test.len(),
            rmse,
            mae,
            r_squared
        );

        let coefficients = model
            .coefficients()
            .into_iter()
            .map(|(feature, weight)| FeatureWeight {
                feature: feature.to_string(),
                weight,
            })
            .collect();

        let report = TrainingReport {
            regressor: self.regressor.name().to_string(),
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            mae,
            rmse,
            r2: r_squared,
            coefficients,
            intercept: model.intercept,
        };

        Ok(TrainedPricingModel { model, report })
    }
}
