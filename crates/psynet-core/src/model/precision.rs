//! Sparse inverse-covariance estimates.

use nalgebra::DMatrix;

use crate::error::{NetworkError, Result};
use crate::model::graph::WeightedGraph;

/// A symmetric precision matrix whose off-diagonal non-zero pattern is a
/// subset of a graph's edge set.
///
/// Entries outside `support ∪ diagonal` are exactly `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionMatrix {
    values: DMatrix<f64>,
    support: Vec<(usize, usize)>,
}

impl PrecisionMatrix {
    /// Wrap an estimate together with the topology it was constrained to.
    ///
    /// Off-support entries are forced to zero and the support entries are
    /// symmetrized, so the invariants hold regardless of round-off in the
    /// estimator.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if `values` is not square or a
    /// support pair is out of range or on the diagonal.
    pub fn from_parts(values: DMatrix<f64>, support: Vec<(usize, usize)>) -> Result<Self> {
        let n = values.nrows();
        if n != values.ncols() {
            return Err(NetworkError::invalid_input(format!(
                "precision matrix must be square, got {}x{}",
                n,
                values.ncols()
            )));
        }

        let mut mask = vec![false; n * n];
        let mut normalized = Vec::with_capacity(support.len());
        for (a, b) in support {
            if a >= n || b >= n || a == b {
                return Err(NetworkError::invalid_input(format!(
                    "support pair ({a}, {b}) invalid for dimension {n}"
                )));
            }
            mask[a * n + b] = true;
            mask[b * n + a] = true;
            normalized.push((a.min(b), a.max(b)));
        }
        normalized.sort_unstable();
        normalized.dedup();

        let clean = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                values[(i, i)]
            } else if mask[i * n + j] {
                0.5 * (values[(i, j)] + values[(j, i)])
            } else {
                0.0
            }
        });

        Ok(Self {
            values: clean,
            support: normalized,
        })
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    #[must_use]
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Topology edges `(i, j)` with `i < j`, sorted.
    #[must_use]
    pub fn support(&self) -> &[(usize, usize)] {
        &self.support
    }

    /// Partial correlations `-p_ij / sqrt(p_ii * p_jj)` with a unit diagonal.
    ///
    /// Off-support entries stay exactly zero. A non-positive diagonal entry
    /// yields zero partial correlations for that node.
    #[must_use]
    pub fn partial_correlations(&self) -> DMatrix<f64> {
        let n = self.dim();
        let mut out = DMatrix::identity(n, n);
        for &(i, j) in &self.support {
            let denom = (self.values[(i, i)] * self.values[(j, j)]).sqrt();
            let r = if denom.is_finite() && denom > 0.0 {
                -self.values[(i, j)] / denom
            } else {
                0.0
            };
            out[(i, j)] = r;
            out[(j, i)] = r;
        }
        out
    }

    /// Graph over the support weighted by partial correlations.
    ///
    /// Support edges whose partial correlation is exactly zero are dropped.
    ///
    /// # Errors
    ///
    /// Propagates [`WeightedGraph::from_edges`] failures (non-finite partial
    /// correlations).
    pub fn to_partial_correlation_graph(&self) -> Result<WeightedGraph> {
        let pcor = self.partial_correlations();
        WeightedGraph::from_edges(
            self.dim(),
            self.support
                .iter()
                .map(|&(i, j)| (i, j, pcor[(i, j)]))
                .filter(|&(_, _, w)| w != 0.0),
        )
    }
}
