//! Sample covariance and Pearson correlation of observation columns.

use nalgebra::DMatrix;
use tracing::{debug, instrument};

use crate::error::{NetworkError, Result};
use crate::model::{AssociationMatrix, CorrelationMatrix, CovarianceMatrix, ObservationMatrix};

/// Sample covariance of the items (`n - 1` denominator).
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] for fewer than two subjects.
#[instrument(skip(observations), fields(subjects = observations.subjects(), items = observations.items()))]
pub fn covariance(observations: &ObservationMatrix) -> Result<CovarianceMatrix> {
    let n = observations.subjects();
    if n < 2 {
        return Err(NetworkError::invalid_input(format!(
            "covariance needs at least 2 subjects, got {n}"
        )));
    }

    let data = observations.values();
    let means: Vec<f64> = data.column_iter().map(|c| c.mean()).collect();
    let centered = DMatrix::from_fn(n, data.ncols(), |i, j| data[(i, j)] - means[j]);

    let mut cov = centered.transpose() * &centered;
    cov /= (n - 1) as f64;

    // Exact symmetry; the product is symmetric up to round-off only.
    let cov = DMatrix::from_fn(cov.nrows(), cov.ncols(), |i, j| {
        if i <= j { cov[(i, j)] } else { cov[(j, i)] }
    });

    debug!(items = cov.nrows(), "computed sample covariance");
    AssociationMatrix::covariance(cov)
}

/// Pearson correlation of the items.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] for fewer than two subjects or a
/// zero-variance item.
#[instrument(skip(observations), fields(subjects = observations.subjects(), items = observations.items()))]
pub fn correlation(observations: &ObservationMatrix) -> Result<CorrelationMatrix> {
    covariance(observations)?.to_correlation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssociationKind;

    fn obs(rows: &[Vec<f64>]) -> ObservationMatrix {
        ObservationMatrix::from_rows(rows).expect("valid observations")
    }

    #[test]
    fn covariance_matches_hand_computation() {
        // x = [1,2,3], y = [2,4,7]; var(x)=1, var(y)=6.333.., cov=2.5
        let o = obs(&[vec![1.0, 2.0], vec![2.0, 4.0], vec![3.0, 7.0]]);
        let cov = covariance(&o).expect("enough subjects");
        assert_eq!(cov.kind(), AssociationKind::Covariance);
        assert!((cov.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((cov.get(1, 1) - 19.0 / 3.0).abs() < 1e-12);
        assert!((cov.get(0, 1) - 2.5).abs() < 1e-12);
        assert_eq!(cov.get(0, 1), cov.get(1, 0));
    }

    #[test]
    fn correlation_has_unit_diagonal() {
        let o = obs(&[
            vec![1.0, 2.0, 0.5],
            vec![2.0, 1.0, 0.1],
            vec![3.0, 5.0, 0.9],
            vec![4.0, 3.0, 0.2],
        ]);
        let cor = correlation(&o).expect("non-degenerate");
        for i in 0..3 {
            assert!((cor.get(i, i) - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!(cor.get(i, j).abs() <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn perfectly_related_items_correlate_fully() {
        let o = obs(&[vec![1.0, -2.0], vec![2.0, -4.0], vec![5.0, -10.0]]);
        let cor = correlation(&o).expect("non-degenerate");
        assert!((cor.get(0, 1) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_subject_is_rejected() {
        let o = obs(&[vec![1.0, 2.0]]);
        assert!(matches!(covariance(&o), Err(NetworkError::InvalidInput(_))));
    }

    #[test]
    fn constant_item_is_rejected() {
        let o = obs(&[vec![1.0, 2.0], vec![1.0, 3.0], vec![1.0, 4.0]]);
        assert!(matches!(correlation(&o), Err(NetworkError::InvalidInput(_))));
    }
}
