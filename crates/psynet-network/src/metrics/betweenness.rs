//! Shortest-path betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a node lies on shortest paths between
//! other pairs of nodes. In an item network high-betweenness items bridge
//! otherwise weakly related groups of items.
//!
//! # Algorithm
//!
//! Brandes (2001) with Dijkstra for weighted graphs:
//!
//! 1. For each source `s`, run Dijkstra recording shortest-path counts and
//!    predecessors. Lengths equal within [`TIE_TOLERANCE`] are ties, so
//!    their paths are all counted.
//! 2. Accumulate dependencies in reverse settle order (farthest first).
//! 3. Sum dependencies over all sources and halve: each unordered pair is
//!    seen once from each end.
//!
//! Sources are independent. They run in parallel, each worker folding into
//! its own accumulator, and the accumulators are summed at the end.
//!
//! Complexity: O(V · (E + V log V)).
//!
//! [`TIE_TOLERANCE`]: super::paths::TIE_TOLERANCE

use std::collections::BinaryHeap;

use psynet_core::model::{CentralityVector, DistanceTransform, WeightedGraph};
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::paths::{Frontier, LengthAdjacency, length_adjacency, same_length};

/// Shortest-path betweenness of every node.
///
/// Weighted graphs use `transform` to turn weights into lengths; unweighted
/// graphs use hop counts. Endpoints of a path receive nothing and
/// disconnected pairs contribute nothing.
#[must_use]
#[instrument(skip(graph), fields(n = graph.node_count(), m = graph.edge_count()))]
pub fn standard_betweenness(graph: &WeightedGraph, transform: DistanceTransform) -> CentralityVector {
    let adjacency = length_adjacency(graph, true, transform);
    let n = adjacency.len();
    if n == 0 {
        return CentralityVector::new(Vec::new());
    }

    let totals = (0..n)
        .into_par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, s| {
                accumulate_source(&adjacency, s, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    debug!(sources = n, "betweenness accumulated");
    CentralityVector::new(totals.into_iter().map(|v| v / 2.0).collect())
}

/// Add the dependencies of source `s` on every other node to `cb`.
fn accumulate_source(adjacency: &LengthAdjacency, s: usize, cb: &mut [f64]) {
    let n = adjacency.len();

    // Settle order: nodes in nondecreasing distance from s.
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    // sigma[t]: number of shortest paths from s to t.
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    sigma[s] = 1.0;
    dist[s] = 0.0;
    heap.push(Frontier { dist: 0.0, node: s });

    while let Some(Frontier { node: v, .. }) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        order.push(v);

        for &(w, len) in &adjacency[v] {
            if settled[w] {
                continue;
            }
            let alt = dist[v] + len;
            if dist[w].is_infinite() || (alt < dist[w] && !same_length(alt, dist[w])) {
                dist[w] = alt;
                sigma[w] = sigma[v];
                predecessors[w].clear();
                predecessors[w].push(v);
                heap.push(Frontier { dist: alt, node: w });
            } else if same_length(alt, dist[w]) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = order.pop() {
        for &v in &predecessors[w] {
            if sigma[w] > 0.0 {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
        }
        if w != s {
            cb[w] += delta[w];
        }
    }
}
