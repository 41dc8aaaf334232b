//! Edge lengths and Dijkstra shortest paths shared by the path-based
//! centralities.
//!
//! Edge weights are similarities, so every path measure first turns them
//! into lengths: unit lengths when the caller asks for unweighted paths,
//! otherwise [`DistanceTransform::length`]. Edges without a finite positive
//! length are left out of the adjacency lists entirely.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::DMatrix;
use psynet_core::model::{DistanceTransform, WeightedGraph};
use psynet_core::{NetworkError, Result};
use rayon::prelude::*;
use tracing::instrument;

/// Relative tolerance under which two path lengths count as equal.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// Per-node `(neighbour, length)` lists, sorted by neighbour.
pub(crate) type LengthAdjacency = Vec<Vec<(usize, f64)>>;

/// Build length adjacency lists for `graph`.
///
/// `weighted = false` gives every edge length 1. Unweighted graphs always
/// use unit lengths.
pub(crate) fn length_adjacency(
    graph: &WeightedGraph,
    weighted: bool,
    transform: DistanceTransform,
) -> LengthAdjacency {
    let use_weights = weighted && graph.is_weighted();
    (0..graph.node_count())
        .map(|v| {
            let mut row: Vec<(usize, f64)> = graph
                .neighbors(v)
                .filter_map(|(u, w)| {
                    if use_weights {
                        transform.length(w).map(|d| (u, d))
                    } else {
                        Some((u, 1.0))
                    }
                })
                .collect();
            row.sort_by_key(|&(u, _)| u);
            row
        })
        .collect()
}

/// `InvalidParameter` when weighted paths are requested on a graph that has
/// no weights.
pub(crate) fn check_weighted(graph: &WeightedGraph, weighted: bool) -> Result<()> {
    if weighted && !graph.is_weighted() {
        return Err(NetworkError::invalid_parameter(
            "weighted",
            "weighted path lengths requested on an unweighted graph",
        ));
    }
    Ok(())
}

/// `true` if `a` and `b` are equal within [`TIE_TOLERANCE`].
#[must_use]
pub(crate) fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Min-heap entry: smallest distance first, then lowest node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frontier {
    pub dist: f64,
    pub node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Single-source shortest path lengths; `f64::INFINITY` for unreachable
/// nodes.
pub(crate) fn dijkstra(adjacency: &LengthAdjacency, source: usize) -> Vec<f64> {
    let n = adjacency.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(Frontier {
        dist: 0.0,
        node: source,
    });

    while let Some(Frontier { node: v, .. }) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        for &(u, len) in &adjacency[v] {
            let alt = dist[v] + len;
            if !settled[u] && alt < dist[u] {
                dist[u] = alt;
                heap.push(Frontier { dist: alt, node: u });
            }
        }
    }

    dist
}

/// All-pairs shortest path lengths. Row `s` holds the distances from `s`;
/// unreachable pairs are `f64::INFINITY`.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameter`] if `weighted` is requested on
/// an unweighted graph.
#[instrument(skip(graph), fields(n = graph.node_count()))]
pub fn shortest_path_lengths(
    graph: &WeightedGraph,
    weighted: bool,
    transform: DistanceTransform,
) -> Result<DMatrix<f64>> {
    check_weighted(graph, weighted)?;
    let adjacency = length_adjacency(graph, weighted, transform);
    let n = adjacency.len();

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|s| dijkstra(&adjacency, s))
        .collect();

    Ok(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_shortest_then_lowest() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { dist: 2.0, node: 0 });
        heap.push(Frontier { dist: 1.0, node: 5 });
        heap.push(Frontier { dist: 1.0, node: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|f| f.node)).collect();
        assert_eq!(order, vec![3, 5, 0]);
    }

    #[test]
    fn weighted_detour_beats_direct_edge() {
        // Direct 0-2 has length 1/0.1 = 10; the detour has 1/0.5 + 1/0.5 = 4.
        let g = WeightedGraph::from_edges(3, [(0, 1, 0.5), (1, 2, 0.5), (0, 2, 0.1)])
            .expect("valid");
        let d = shortest_path_lengths(&g, true, DistanceTransform::Inverse).expect("weighted");
        assert!((d[(0, 2)] - 4.0).abs() < 1e-12);
        assert_eq!(d, d.transpose());

        let hops = shortest_path_lengths(&g, false, DistanceTransform::Inverse).expect("hops");
        assert!((hops[(0, 2)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unreachable_is_infinite() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 0.5)]).expect("valid");
        let d = shortest_path_lengths(&g, true, DistanceTransform::Inverse).expect("weighted");
        assert!(d[(0, 2)].is_infinite());
        assert_eq!(d[(2, 2)], 0.0);
    }

    #[test]
    fn unusable_lengths_drop_edges() {
        // |w| = 1 has complement length 0 and cannot carry a path.
        let g = WeightedGraph::from_edges(2, [(0, 1, 1.0)]).expect("valid");
        let d = shortest_path_lengths(&g, true, DistanceTransform::Complement).expect("weighted");
        assert!(d[(0, 1)].is_infinite());
    }

    #[test]
    fn weighted_on_unweighted_graph_is_rejected() {
        let g = WeightedGraph::from_unweighted_edges(2, [(0, 1)]).expect("valid");
        let err = shortest_path_lengths(&g, true, DistanceTransform::Inverse).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::InvalidParameter {
                name: "weighted",
                ..
            }
        ));
    }

    #[test]
    fn ties_within_tolerance() {
        assert!(same_length(0.1 + 0.2, 0.3));
        assert!(!same_length(1.0, 1.0 + 1e-9));
    }
}
