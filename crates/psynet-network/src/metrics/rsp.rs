//! Randomized-shortest-paths (RSP) betweenness.
//!
//! # Overview
//!
//! RSP interpolates between shortest-path betweenness and random-walk
//! betweenness. Walkers from `s` to `t` follow a Boltzmann distribution over
//! all paths: a path's probability is proportional to its reference
//! random-walk probability times `exp(-β · cost)`. Large `β` concentrates
//! on shortest paths; small `β` approaches the plain random walk.
//!
//! # Algorithm
//!
//! ```text
//! P_ref = D⁻¹ |A|                 reference random walk
//! W     = P_ref ∘ exp(-β C)       killed walk, C = edge lengths
//! Z     = (I - W)⁻¹
//!
//! n̄_st(i) = z_si z_it / z_st - z_ti z_it / z_tt
//! ```
//!
//! `n̄_st(i)` is the expected number of passages through `i` of a walk from
//! `s` absorbed at its first arrival at `t`. A node's betweenness sums
//! `n̄_st(i)` over unordered pairs `{s, t}` not containing `i`, matching the
//! pair convention of [`super::betweenness::standard_betweenness`].
//!
//! # Numerical range
//!
//! Entries of `Z` decay like `exp(-β d)` with the path length `d`, so for
//! large `β` a plain inverse underflows long before the walk has
//! concentrated on shortest paths. Each absorbing target `t` is therefore
//! solved on the shifted operator
//!
//! ```text
//! W⁽ᵗ⁾_uv = P_uv exp(-β (c_uv + d_vt - d_ut))     d = shortest path lengths
//! ```
//!
//! which is `S W S⁻¹` for `S = diag(exp(β d_·t))`. Its edges on shortest
//! paths toward `t` keep their full reference probability, and `n̄_st(i)`
//! is unchanged by the similarity. One LU factorization per target serves
//! every source. Nodes that cannot reach `t` are left out of its system.

use nalgebra::DMatrix;
use psynet_core::model::{CentralityVector, DistanceTransform, WeightedGraph};
use psynet_core::{BlockKind, NetworkError, Result};
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use super::paths::{LengthAdjacency, dijkstra, length_adjacency};

/// RSP betweenness of every node for inverse temperature `beta`.
///
/// Edge costs come from `transform` on weighted graphs and are 1 on
/// unweighted graphs; the reference walk moves proportionally to `|w|`.
///
/// # Errors
///
/// - [`NetworkError::InvalidParameter`] if `beta` is not finite and
///   strictly positive.
/// - [`NetworkError::SingularSubmatrix`] if `I - W` cannot be inverted.
#[instrument(skip(graph), fields(n = graph.node_count(), m = graph.edge_count()))]
pub fn randomized_shortest_paths_betweenness(
    graph: &WeightedGraph,
    beta: f64,
    transform: DistanceTransform,
) -> Result<CentralityVector> {
    if !(beta.is_finite() && beta > 0.0) {
        return Err(NetworkError::invalid_parameter(
            "beta",
            format!("must be finite and > 0, got {beta}"),
        ));
    }

    let n = graph.node_count();
    if n == 0 {
        return Ok(CentralityVector::new(Vec::new()));
    }

    let walk = ReferenceWalk::new(graph, transform);
    let (totals, skipped) = (0..n)
        .into_par_iter()
        .try_fold(
            || (vec![0.0; n], 0_usize),
            |(mut acc, skipped), t| {
                let s = walk.accumulate_target(t, beta, &mut acc)?;
                Ok::<_, NetworkError>((acc, skipped + s))
            },
        )
        .try_reduce(
            || (vec![0.0; n], 0),
            |(mut a, sa), (b, sb)| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                Ok((a, sa + sb))
            },
        )?;

    if skipped > 0 {
        warn!(
            pairs = skipped,
            beta, "skipped connected node pairs whose walk weight underflowed"
        );
    }

    debug!(beta, "rsp betweenness accumulated");
    Ok(CentralityVector::new(
        totals.into_iter().map(|v| v / 2.0).collect(),
    ))
}

/// The reference random walk restricted to edges that carry paths.
struct ReferenceWalk {
    lengths: LengthAdjacency,
    /// `P_ref` entries aligned with `lengths`.
    transition: Vec<Vec<f64>>,
}

impl ReferenceWalk {
    fn new(graph: &WeightedGraph, transform: DistanceTransform) -> Self {
        let mut lengths = Vec::with_capacity(graph.node_count());
        let mut transition = Vec::with_capacity(graph.node_count());

        for (i, row) in length_adjacency(graph, true, transform).into_iter().enumerate() {
            // Zero-affinity edges can neither be walked nor shorten a walk.
            let (edges, affinities): (Vec<(usize, f64)>, Vec<f64>) = row
                .into_iter()
                .map(|(j, cost)| {
                    let a = if graph.is_weighted() {
                        graph.weight(i, j).map_or(0.0, f64::abs)
                    } else {
                        1.0
                    };
                    ((j, cost), a)
                })
                .filter(|&(_, a)| a > 0.0)
                .unzip();
            let degree: f64 = affinities.iter().sum();
            transition.push(affinities.into_iter().map(|a| a / degree).collect());
            lengths.push(edges);
        }

        Self { lengths, transition }
    }

    /// Add `n̄_st(i)` for every ordered pair `(s, t)` ending at `t` to `acc`.
    /// Returns the number of connected sources skipped for zero walk weight.
    fn accumulate_target(&self, t: usize, beta: f64, acc: &mut [f64]) -> Result<usize> {
        let dist = dijkstra(&self.lengths, t);
        let members: Vec<usize> = (0..dist.len()).filter(|&u| dist[u].is_finite()).collect();
        if members.len() < 3 {
            return Ok(0);
        }

        let mut local = vec![None; dist.len()];
        for (a, &u) in members.iter().enumerate() {
            local[u] = Some(a);
        }

        let m = members.len();
        let mut system = DMatrix::<f64>::identity(m, m);
        for (a, &u) in members.iter().enumerate() {
            for (&(v, cost), &p) in self.lengths[u].iter().zip(&self.transition[u]) {
                let Some(b) = local[v] else { continue };
                let slack = (cost + dist[v] - dist[u]).max(0.0);
                system[(a, b)] -= p * (-beta * slack).exp();
            }
        }

        let singular = || NetworkError::SingularSubmatrix {
            kind: BlockKind::TransitionOperator,
            nodes: members.clone(),
        };
        let z = system.lu().try_inverse().ok_or_else(singular)?;
        if z.iter().any(|v| !v.is_finite()) {
            return Err(singular());
        }

        let lt = local[t].ok_or_else(singular)?;
        let z_tt = z[(lt, lt)];
        let sources: Vec<usize> = (0..m)
            .filter(|&a| a != lt && z[(a, lt)] > 0.0)
            .collect();
        let skipped = m - 1 - sources.len();

        for (b, &i) in members.iter().enumerate() {
            if b == lt {
                continue;
            }
            let z_it = z[(b, lt)];
            let back = if z_tt > 0.0 { z[(lt, b)] * z_it / z_tt } else { 0.0 };
            for &a in sources.iter().filter(|&&a| a != b) {
                let passages = z[(a, b)] * z_it / z[(a, lt)] - back;
                acc[i] += passages.max(0.0);
            }
        }

        Ok(skipped)
    }
}
