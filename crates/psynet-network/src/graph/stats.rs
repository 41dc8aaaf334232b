//! Summary statistics for an item network.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the graph.
//! - **density**: `2m / (n (n - 1))` for an undirected graph. Zero for
//!   graphs with 0 or 1 node.
//! - **component_count**: connected components; isolated nodes count as one
//!   each.
//! - **isolated_node_count**: nodes with no incident edge.
//! - **max_degree**: highest number of incident edges on one node.
//! - **mean_abs_weight**: mean of `|w|` over all edges.
//! - **average_path_length** / **diameter**: mean and maximum shortest path
//!   length over reachable ordered pairs, using the graph's weights through
//!   a [`DistanceTransform`] (unit lengths for unweighted graphs).
//! - **is_maximal_planar**: `edge_count == 3n - 6`, the edge count of every
//!   TMFG.

use psynet_core::model::{DistanceTransform, WeightedGraph};
use serde::Serialize;
use tracing::instrument;

use crate::metrics::paths::shortest_path_lengths;

/// Summary statistics for an item network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// `2m / (n (n - 1))`, in `[0, 1]`.
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    /// Zero for a graph without edges.
    pub mean_abs_weight: f64,
    /// Mean finite shortest path length between distinct nodes. Zero when
    /// no pair is connected.
    pub average_path_length: f64,
    /// Longest finite shortest path length.
    pub diameter: f64,
    /// `true` when the graph has exactly `3n - 6` edges (`n >= 3`).
    pub is_maximal_planar: bool,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    #[instrument(skip(graph), fields(n = graph.node_count(), m = graph.edge_count()))]
    pub fn from_graph(graph: &WeightedGraph, transform: DistanceTransform) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let edges = graph.edges();

        let degrees: Vec<usize> = (0..node_count).map(|v| graph.degree(v)).collect();
        let isolated_node_count = degrees.iter().filter(|&&d| d == 0).count();
        let max_degree = degrees.iter().copied().max().unwrap_or(0);

        let mean_abs_weight = if edges.is_empty() {
            0.0
        } else {
            edges.iter().map(|(_, _, w)| w.abs()).sum::<f64>() / edges.len() as f64
        };

        let (average_path_length, diameter) = path_summary(graph, transform);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count: graph.component_count(),
            isolated_node_count,
            max_degree,
            mean_abs_weight,
            average_path_length,
            diameter,
            is_maximal_planar: node_count >= 3 && edge_count == 3 * node_count - 6,
        }
    }
}

fn compute_density(n: usize, m: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    (2 * m) as f64 / (n * (n - 1)) as f64
}

fn path_summary(graph: &WeightedGraph, transform: DistanceTransform) -> (f64, f64) {
    let Ok(lengths) = shortest_path_lengths(graph, graph.is_weighted(), transform) else {
        return (0.0, 0.0);
    };

    let n = graph.node_count();
    let mut total = 0.0;
    let mut pairs = 0_usize;
    let mut diameter = 0.0_f64;
    for i in 0..n {
        for j in 0..n {
            let d = lengths[(i, j)];
            if i != j && d.is_finite() {
                total += d;
                pairs += 1;
                diameter = diameter.max(d);
            }
        }
    }

    if pairs == 0 {
        (0.0, 0.0)
    } else {
        (total / pairs as f64, diameter)
    }
}
