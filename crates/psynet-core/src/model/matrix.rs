//! Validated correlation and covariance matrices.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Relative tolerance used for the symmetry check.
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Whether an [`AssociationMatrix`] holds correlations or covariances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    Correlation,
    Covariance,
}

/// A square, symmetric, finite item-by-item matrix.
///
/// Positive semi-definiteness is not checked; downstream inversions report
/// [`NetworkError::SingularSubmatrix`] when it matters.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationMatrix {
    values: DMatrix<f64>,
    kind: AssociationKind,
}

/// A correlation matrix (unit diagonal).
pub type CorrelationMatrix = AssociationMatrix;
/// A covariance matrix (variances on the diagonal).
pub type CovarianceMatrix = AssociationMatrix;

impl AssociationMatrix {
    /// Validate and wrap `values`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if the matrix is empty, not
    /// square, contains a non-finite entry, or is not symmetric within
    /// [`SYMMETRY_TOLERANCE`].
    pub fn new(values: DMatrix<f64>, kind: AssociationKind) -> Result<Self> {
        validate_symmetric(&values)?;
        Ok(Self { values, kind })
    }

    /// Shorthand for a correlation matrix.
    ///
    /// # Errors
    ///
    /// See [`AssociationMatrix::new`].
    pub fn correlation(values: DMatrix<f64>) -> Result<Self> {
        Self::new(values, AssociationKind::Correlation)
    }

    /// Shorthand for a covariance matrix.
    ///
    /// # Errors
    ///
    /// See [`AssociationMatrix::new`].
    pub fn covariance(values: DMatrix<f64>) -> Result<Self> {
        Self::new(values, AssociationKind::Covariance)
    }

    /// Number of items.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }

    #[must_use]
    pub const fn kind(&self) -> AssociationKind {
        self.kind
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    #[must_use]
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// The principal sub-matrix over `indices`, in the given order.
    #[must_use]
    pub fn submatrix(&self, indices: &[usize]) -> DMatrix<f64> {
        let k = indices.len();
        DMatrix::from_fn(k, k, |a, b| self.values[(indices[a], indices[b])])
    }

    /// Rescale to a correlation matrix. Correlations are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if any variance is not strictly
    /// positive.
    pub fn to_correlation(&self) -> Result<Self> {
        if self.kind == AssociationKind::Correlation {
            return Ok(self.clone());
        }

        let sd: Vec<f64> = self.values.diagonal().iter().map(|v| v.sqrt()).collect();
        if let Some(item) = sd.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(NetworkError::invalid_input(format!(
                "item {item} has non-positive variance"
            )));
        }

        let n = self.dim();
        let values = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                1.0
            } else {
                self.values[(i, j)] / (sd[i] * sd[j])
            }
        });

        Ok(Self {
            values,
            kind: AssociationKind::Correlation,
        })
    }
}

/// Check that `values` is a non-empty, square, finite, symmetric matrix.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] describing the first violation.
pub fn validate_symmetric(values: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = values.shape();
    if rows == 0 || rows != cols {
        return Err(NetworkError::invalid_input(format!(
            "matrix must be square and non-empty, got {rows}x{cols}"
        )));
    }

    for i in 0..rows {
        for j in i..cols {
            let a = values[(i, j)];
            let b = values[(j, i)];
            if !a.is_finite() || !b.is_finite() {
                return Err(NetworkError::invalid_input(format!(
                    "non-finite entry at ({i}, {j})"
                )));
            }
            if (a - b).abs() > SYMMETRY_TOLERANCE * a.abs().max(1.0) {
                return Err(NetworkError::invalid_input(format!(
                    "matrix is not symmetric at ({i}, {j}): {a} vs {b}"
                )));
            }
        }
    }

    Ok(())
}
