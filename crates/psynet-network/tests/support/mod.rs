//! Shared fixtures for psynet-network integration tests.
#![allow(dead_code)]

use nalgebra::DMatrix;
use psynet_core::model::{CovarianceMatrix, ObservationMatrix, Partition, WeightedGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Responses from a simple-structure factor model.
pub struct FactorData {
    pub observations: ObservationMatrix,
    pub partition: Partition,
    /// `latent[c][s]`: factor `c` for subject `s`.
    pub latent: Vec<Vec<f64>>,
}

/// Every item loads `sqrt(rho)` on its community factor, so items in the
/// same community correlate at `rho` and items in different communities at
/// zero in the population.
pub fn factor_data(
    communities: usize,
    items_per_community: usize,
    subjects: usize,
    rho: f64,
    seed: u64,
) -> FactorData {
    let mut rng = StdRng::seed_from_u64(seed);
    let items = communities * items_per_community;
    let (load, noise) = (rho.sqrt(), (1.0 - rho).sqrt());

    let mut latent = vec![vec![0.0; subjects]; communities];
    let mut data = DMatrix::zeros(subjects, items);
    for s in 0..subjects {
        for (c, factor) in latent.iter_mut().enumerate() {
            let f: f64 = rng.sample(StandardNormal);
            factor[s] = f;
            for k in 0..items_per_community {
                let e: f64 = rng.sample(StandardNormal);
                data[(s, c * items_per_community + k)] = load * f + noise * e;
            }
        }
    }

    let memberships: Vec<u32> = (0..items)
        .map(|i| u32::try_from(i / items_per_community).expect("small community count"))
        .collect();

    FactorData {
        observations: ObservationMatrix::from_matrix(data).expect("finite draws"),
        partition: Partition::from_memberships(&memberships).expect("non-empty"),
        latent,
    }
}

/// A diagonally dominant precision matrix supported on `graph`, and its
/// inverse as a covariance matrix.
pub fn markov_covariance(graph: &WeightedGraph) -> (DMatrix<f64>, CovarianceMatrix) {
    let n = graph.node_count();
    let mut k = DMatrix::<f64>::zeros(n, n);
    for (idx, (i, j, _)) in graph.edges().into_iter().enumerate() {
        let v = if idx % 2 == 0 { -0.15 } else { 0.1 };
        k[(i, j)] = v;
        k[(j, i)] = v;
    }
    for i in 0..n {
        let off: f64 = (0..n).filter(|&j| j != i).map(|j| k[(i, j)].abs()).sum();
        k[(i, i)] = 1.0 + off;
    }

    let sigma = k.clone().try_inverse().expect("diagonally dominant");
    let sigma = (&sigma + sigma.transpose()) * 0.5;
    (k, CovarianceMatrix::covariance(sigma).expect("symmetric"))
}
