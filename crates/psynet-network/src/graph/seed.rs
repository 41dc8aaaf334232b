//! Choice of the initial tetrahedron for TMFG construction.
//!
//! # Strategies
//!
//! - [`SeedStrategy::Greedy`]: score every node by the total of its absolute
//!   weights that exceed the mean absolute off-diagonal weight, then take the
//!   four best (lower index wins ties). O(n²).
//! - [`SeedStrategy::Exact`]: enumerate all quartets and keep the one whose
//!   six pairwise absolute weights sum highest (the lexicographically
//!   smallest quartet wins ties). O(n⁴), so it is refused above a
//!   configurable item count.
//!
//! Both return the quartet in ascending index order.

use nalgebra::DMatrix;
use psynet_core::config::{SeedStrategy, TmfgConfig};
use psynet_core::{NetworkError, Result};

/// Select the seed quartet from the absolute weight matrix `abs`.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameter`] when the exact strategy is
/// requested for more than `config.exact_seed_limit` items.
pub fn select_seed(abs: &DMatrix<f64>, config: &TmfgConfig) -> Result<[usize; 4]> {
    match config.seed {
        SeedStrategy::Greedy => Ok(greedy_seed(abs)),
        SeedStrategy::Exact => {
            let n = abs.nrows();
            if n > config.exact_seed_limit {
                return Err(NetworkError::invalid_parameter(
                    "tmfg.seed",
                    format!(
                        "exact seed search is O(n^4); {n} items exceeds exact_seed_limit = {}",
                        config.exact_seed_limit
                    ),
                ));
            }
            Ok(exact_seed(abs))
        }
    }
}

fn greedy_seed(abs: &DMatrix<f64>) -> [usize; 4] {
    let n = abs.nrows();
    let off_diagonal = (n * (n - 1)) as f64;
    let total: f64 = (0..n)
        .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
        .map(|(i, j)| abs[(i, j)])
        .sum();
    let mean = total / off_diagonal;

    let strength: Vec<f64> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| j != i && abs[(i, j)] > mean)
                .map(|j| abs[(i, j)])
                .sum()
        })
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| strength[b].total_cmp(&strength[a]).then(a.cmp(&b)));

    let mut seed = [order[0], order[1], order[2], order[3]];
    seed.sort_unstable();
    seed
}

fn exact_seed(abs: &DMatrix<f64>) -> [usize; 4] {
    let n = abs.nrows();
    let mut best = [0, 1, 2, 3];
    let mut best_score = f64::NEG_INFINITY;

    for a in 0..n {
        for b in (a + 1)..n {
            let ab = abs[(a, b)];
            for c in (b + 1)..n {
                let abc = ab + abs[(a, c)] + abs[(b, c)];
                for d in (c + 1)..n {
                    let score = abc + abs[(a, d)] + abs[(b, d)] + abs[(c, d)];
                    if score > best_score {
                        best_score = score;
                        best = [a, b, c, d];
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nodes 5..9 form a strongly tied quartet, everything else is weak.
    fn dominant_quartet(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                1.0
            } else if (5..9).contains(&i) && (5..9).contains(&j) {
                0.8
            } else {
                0.1 + 0.001 * ((i + j) % 7) as f64
            }
        })
    }

    #[test]
    fn greedy_and_exact_agree_on_dominant_quartet() {
        let abs = dominant_quartet(12);
        let greedy = select_seed(&abs, &TmfgConfig::default()).expect("greedy");
        let exact = select_seed(
            &abs,
            &TmfgConfig {
                seed: SeedStrategy::Exact,
                ..TmfgConfig::default()
            },
        )
        .expect("exact within limit");
        assert_eq!(greedy, [5, 6, 7, 8]);
        assert_eq!(exact, [5, 6, 7, 8]);
    }

    #[test]
    fn greedy_ties_prefer_lower_indices() {
        let abs = DMatrix::from_fn(10, 10, |i, j| if i == j { 1.0 } else { 0.5 });
        let seed = select_seed(&abs, &TmfgConfig::default()).expect("greedy");
        assert_eq!(seed, [0, 1, 2, 3]);
    }

    #[test]
    fn exact_is_refused_above_limit() {
        let abs = dominant_quartet(30);
        let err = select_seed(
            &abs,
            &TmfgConfig {
                seed: SeedStrategy::Exact,
                exact_seed_limit: 20,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NetworkError::InvalidParameter {
                name: "tmfg.seed",
                ..
            }
        ));
    }
}
