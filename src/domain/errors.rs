use thiserror::Error;

/// Errors raised while synthesizing the pricing table or fitting the model on it
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset is empty: at least one observation is required")]
    EmptyDataset,

    #[error("Not enough rows for a train/test split: {rows} < {min}")]
    InsufficientRows { rows: usize, min: usize },

    #[error("Split produced an empty {split} partition (rows={rows}, test_size={test_size:.2})")]
    EmptySplit {
        split: &'static str,
        rows: usize,
        test_size: f64,
    },

    #[error("Invalid {distribution} parameters: {reason}")]
    InvalidDistribution {
        distribution: &'static str,
        reason: String,
    },

    #[error("Feature/target length mismatch: {features} feature rows vs {targets} targets")]
    ShapeMismatch { features: usize, targets: usize },

    #[error("Matrix construction failed: {reason}")]
    Matrix { reason: String },

    #[error("Regression backend failed: {reason}")]
    Regression { reason: String },
}

impl DataError {
    pub fn regression(reason: impl std::fmt::Display) -> Self {
        DataError::Regression {
            reason: reason.to_string(),
        }
    }

    pub fn matrix(reason: impl std::fmt::Display) -> Self {
        DataError::Matrix {
            reason: reason.to_string(),
        }
    }
}
