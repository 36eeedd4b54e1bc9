use crate::domain::errors::DataError;
use crate::domain::ml::feature_registry::FEATURE_COUNT;
use crate::domain::ml::linear_model::LinearModel;

/// Interface for regression backends used by the model trainer
pub trait Regressor: Send + Sync {
    /// Fit the model on feature rows `x` (registry column order) and targets `y`
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), DataError>;

    /// Predict one value per feature row
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, DataError>;

    /// Get backend name
    fn name(&self) -> &str;
}

/// Reads the fitted affine map out of a linear regressor.
///
/// The prediction at the origin is the intercept and the response to each unit vector,
/// minus the intercept, is that feature's weight. Only valid for affine backends.
pub fn freeze_linear(regressor: &dyn Regressor) -> Result<LinearModel, DataError> {
    let mut probes = vec![vec![0.0; FEATURE_COUNT]];
    for i in 0..FEATURE_COUNT {
        let mut unit = vec![0.0; FEATURE_COUNT];
        unit[i] = 1.0;
        probes.push(unit);
    }

    let responses = regressor.predict(&probes)?;
    if responses.len() != probes.len() {
        return Err(DataError::ShapeMismatch {
            features: probes.len(),
            targets: responses.len(),
        });
    }

    let intercept = responses[0];
    let mut weights = [0.0; FEATURE_COUNT];
    for (w, r) in weights.iter_mut().zip(&responses[1..]) {
        *w = r - intercept;
    }

    Ok(LinearModel::new(weights, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AffineStub {
        model: LinearModel,
    }

    impl Regressor for AffineStub {
        fn fit(&mut self, _x: &[Vec<f64>], _y: &[f64]) -> Result<(), DataError> {
            Ok(())
        }

        fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, DataError> {
            Ok(x.iter()
                .map(|row| self.model.predict_row(&[row[0], row[1], row[2]]))
                .collect())
        }

        fn name(&self) -> &str {
            "affine-stub"
        }
    }

    struct BrokenStub;

    impl Regressor for BrokenStub {
        fn fit(&mut self, _x: &[Vec<f64>], _y: &[f64]) -> Result<(), DataError> {
            Ok(())
        }

        fn predict(&self, _x: &[Vec<f64>]) -> Result<Vec<f64>, DataError> {
            Ok(vec![1.0])
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_freeze_recovers_weights() {
        let stub = AffineStub {
            model: LinearModel::new([40.0, 0.9, 8.0], -10.0),
        };

        let frozen = freeze_linear(&stub).unwrap();
        assert!((frozen.intercept + 10.0).abs() < 1e-12);
        assert!((frozen.weights[0] - 40.0).abs() < 1e-12);
        assert!((frozen.weights[1] - 0.9).abs() < 1e-12);
        assert!((frozen.weights[2] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_freeze_rejects_short_response() {
        let err = freeze_linear(&BrokenStub).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { .. }));
    }
}
