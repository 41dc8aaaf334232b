//! Raw subject-by-item response data.

use nalgebra::DMatrix;

use crate::error::{NetworkError, Result};

/// Responses of `subjects` subjects (rows) to `items` items (columns).
///
/// Every value is finite. Missing data is represented upstream as `NaN` and
/// rejected here: pairwise-complete estimation is not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMatrix {
    data: DMatrix<f64>,
}

impl ObservationMatrix {
    /// Build from row vectors (one per subject).
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] when there are no rows or no
    /// columns, rows have different lengths, or any value is not finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(NetworkError::invalid_input("observation matrix has no rows"));
        };
        let items = first.len();

        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != items) {
            return Err(NetworkError::invalid_input(format!(
                "ragged observations: row {row} has {} values, expected {items}",
                r.len()
            )));
        }

        let data = DMatrix::from_fn(rows.len(), items, |i, j| rows[i][j]);
        Self::from_matrix(data)
    }

    /// Build from a subjects × items matrix.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] for an empty matrix or any
    /// non-finite value.
    pub fn from_matrix(data: DMatrix<f64>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(NetworkError::invalid_input(format!(
                "observation matrix is empty ({}x{})",
                data.nrows(),
                data.ncols()
            )));
        }

        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            // nalgebra stores column-major.
            let (row, col) = (pos % data.nrows(), pos / data.nrows());
            return Err(NetworkError::invalid_input(format!(
                "missing or non-finite value at subject {row}, item {col}"
            )));
        }

        Ok(Self { data })
    }

    /// Number of subjects (rows).
    #[must_use]
    pub fn subjects(&self) -> usize {
        self.data.nrows()
    }

    /// Number of items (columns).
    #[must_use]
    pub fn items(&self) -> usize {
        self.data.ncols()
    }

    /// Response of `subject` to `item`.
    #[must_use]
    pub fn get(&self, subject: usize, item: usize) -> f64 {
        self.data[(subject, item)]
    }

    /// The underlying subjects × items matrix.
    #[must_use]
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// All responses to one item.
    #[must_use]
    pub fn item_column(&self, item: usize) -> Vec<f64> {
        self.data.column(item).iter().copied().collect()
    }
}
