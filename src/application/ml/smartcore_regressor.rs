use super::regressor::Regressor;
use crate::domain::errors::DataError;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

type FittedLinearRegression = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Least-squares solver used by the smartcore backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegressionSolver {
    Qr,
    #[default]
    Svd,
}

impl FromStr for RegressionSolver {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qr" => Ok(RegressionSolver::Qr),
            "svd" => Ok(RegressionSolver::Svd),
            _ => anyhow::bail!("Invalid REGRESSION_SOLVER: {}. Must be 'qr' or 'svd'", s),
        }
    }
}

impl fmt::Display for RegressionSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionSolver::Qr => f.write_str("qr"),
            RegressionSolver::Svd => f.write_str("svd"),
        }
    }
}

impl From<RegressionSolver> for LinearRegressionSolverName {
    fn from(solver: RegressionSolver) -> Self {
        match solver {
            RegressionSolver::Qr => LinearRegressionSolverName::QR,
            RegressionSolver::Svd => LinearRegressionSolverName::SVD,
        }
    }
}

/// Ordinary least squares through smartcore's `LinearRegression`.
pub struct SmartcoreLinearRegressor {
    solver: RegressionSolver,
    model: Option<FittedLinearRegression>,
}

impl SmartcoreLinearRegressor {
    pub fn new(solver: RegressionSolver) -> Self {
        Self {
            solver,
            model: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}

impl Default for SmartcoreLinearRegressor {
    fn default() -> Self {
        Self::new(RegressionSolver::default())
    }
}

impl Regressor for SmartcoreLinearRegressor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), DataError> {
        if x.len() != y.len() {
            return Err(DataError::ShapeMismatch {
                features: x.len(),
                targets: y.len(),
            });
        }

        let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(DataError::matrix)?;
        let y_vec = y.to_vec();

        let params = LinearRegressionParameters::default().with_solver(self.solver.into());
        let model =
            LinearRegression::fit(&x_matrix, &y_vec, params).map_err(DataError::regression)?;

        debug!(
            "Fitted smartcore linear regression on {} rows (solver={})",
            x.len(),
            self.solver
        );
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, DataError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| DataError::regression("model has not been fitted"))?;

        if x.is_empty() {
            return Ok(Vec::new());
        }

        let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(DataError::matrix)?;
        model.predict(&x_matrix).map_err(DataError::regression)
    }

    fn name(&self) -> &str {
        "SmartCore Linear Regression"
    }
}
