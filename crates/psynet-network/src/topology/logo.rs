//! LoGo (Local-Global) sparse inverse covariance.
//!
//! # Algorithm
//!
//! ```text
//! J = Σ_cliques  [Σ_CC]⁻¹ embedded at (C, C)
//!   − Σ_separators [Σ_SS]⁻¹ embedded at (S, S)
//! ```
//!
//! Only small blocks are inverted (4×4 and 3×3 for a TMFG), so the cost is
//! linear in the number of cliques. Block inversions are independent and run
//! in parallel; the embedding is a sequential sum in clique order so the
//! result does not depend on thread scheduling.
//!
//! Entries outside the topology and the diagonal are never written, so they
//! are exactly zero.

use nalgebra::{DMatrix, SymmetricEigen};
use psynet_core::model::{CovarianceMatrix, PrecisionMatrix, WeightedGraph};
use psynet_core::{BlockKind, NetworkError, Result};
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::JunctionTree;

/// Relative eigenvalue threshold below which a block counts as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Sparse precision matrix of `covariance` constrained to `topology`.
///
/// # Errors
///
/// - [`NetworkError::InvalidInput`] if the dimensions differ or the topology
///   is not chordal.
/// - [`NetworkError::SingularSubmatrix`] if a clique or separator block
///   cannot be inverted.
#[instrument(skip(covariance, topology), fields(n = covariance.dim(), edges = topology.edge_count()))]
pub fn build_precision(
    covariance: &CovarianceMatrix,
    topology: &WeightedGraph,
) -> Result<PrecisionMatrix> {
    if covariance.dim() != topology.node_count() {
        return Err(NetworkError::invalid_input(format!(
            "covariance is {n}x{n} but the topology has {m} nodes",
            n = covariance.dim(),
            m = topology.node_count()
        )));
    }

    let tree = JunctionTree::from_graph(topology)?;
    let values = accumulate(covariance, &tree)?;
    let support = topology.edges().into_iter().map(|(i, j, _)| (i, j)).collect();
    PrecisionMatrix::from_parts(values, support)
}

/// Sparse precision matrix from a precomputed junction tree, e.g.
/// [`crate::graph::Tmfg::junction_tree`].
///
/// # Errors
///
/// - [`NetworkError::InvalidInput`] if the tree references a node outside the
///   covariance matrix.
/// - [`NetworkError::SingularSubmatrix`] as for [`build_precision`].
#[instrument(skip(covariance, tree), fields(n = covariance.dim(), cliques = tree.cliques().len()))]
pub fn build_precision_with_tree(
    covariance: &CovarianceMatrix,
    tree: &JunctionTree,
) -> Result<PrecisionMatrix> {
    if let Some(max) = tree.max_node().filter(|&m| m >= covariance.dim()) {
        return Err(NetworkError::invalid_input(format!(
            "junction tree references node {max} but the covariance has dimension {}",
            covariance.dim()
        )));
    }

    let values = accumulate(covariance, tree)?;
    PrecisionMatrix::from_parts(values, tree.covered_pairs())
}

struct Block<'a> {
    nodes: &'a [usize],
    kind: BlockKind,
}

fn accumulate(covariance: &CovarianceMatrix, tree: &JunctionTree) -> Result<DMatrix<f64>> {
    let blocks: Vec<Block<'_>> = tree
        .cliques()
        .iter()
        .map(|c| Block {
            nodes: c,
            kind: BlockKind::Clique,
        })
        .chain(tree.separators().iter().map(|s| Block {
            nodes: s,
            kind: BlockKind::Separator,
        }))
        .collect();

    let inverted: Vec<Result<DMatrix<f64>>> = blocks
        .par_iter()
        .map(|b| invert_block(covariance.submatrix(b.nodes), b))
        .collect();

    let n = covariance.dim();
    let mut values = DMatrix::zeros(n, n);
    for (block, inverse) in blocks.iter().zip(inverted) {
        let inverse = inverse?;
        let sign = match block.kind {
            BlockKind::Separator => -1.0,
            _ => 1.0,
        };
        for (a, &i) in block.nodes.iter().enumerate() {
            for (b, &j) in block.nodes.iter().enumerate() {
                values[(i, j)] += sign * inverse[(a, b)];
            }
        }
    }

    debug!(blocks = blocks.len(), "embedded block inverses");
    Ok(values)
}

/// Invert a symmetric block through its eigendecomposition.
fn invert_block(sub: DMatrix<f64>, block: &Block<'_>) -> Result<DMatrix<f64>> {
    let eigen = SymmetricEigen::new(sub);
    let largest = eigen.eigenvalues.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let smallest = eigen
        .eigenvalues
        .iter()
        .fold(f64::INFINITY, |m, v| m.min(v.abs()));

    if !(largest > 0.0 && smallest > SINGULAR_TOLERANCE * largest) {
        return Err(NetworkError::SingularSubmatrix {
            kind: block.kind,
            nodes: block.nodes.to_vec(),
        });
    }

    let inv_diag = DMatrix::from_diagonal(&eigen.eigenvalues.map(|l| 1.0 / l));
    Ok(&eigen.eigenvectors * inv_diag * eigen.eigenvectors.transpose())
}
