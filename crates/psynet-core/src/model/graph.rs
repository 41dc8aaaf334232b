//! Sparse undirected weighted graph over item indices.
//!
//! # Overview
//!
//! [`WeightedGraph`] wraps a petgraph [`UnGraph`] whose node `i` carries item
//! index `i`, so petgraph's `NodeIndex::new(i)` and the item index are
//! interchangeable everywhere in the workspace.
//!
//! Edge weights are similarities (correlations, partial correlations).
//! Path-based measures convert them to lengths with a [`DistanceTransform`].

use nalgebra::DMatrix;
use petgraph::{
    algo::connected_components,
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// How an edge weight (a similarity) becomes a path length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTransform {
    /// `1 / |w|`.
    #[default]
    Inverse,
    /// `1 - |w|`.
    Complement,
    /// `-ln |w|`.
    NegLog,
}

impl DistanceTransform {
    /// Path length for an edge of weight `weight`.
    ///
    /// Returns `None` when the length is not finite and strictly positive;
    /// such edges do not carry paths.
    #[must_use]
    pub fn length(self, weight: f64) -> Option<f64> {
        let w = weight.abs();
        let d = match self {
            Self::Inverse => 1.0 / w,
            Self::Complement => 1.0 - w,
            Self::NegLog => -w.ln(),
        };
        (d.is_finite() && d > 0.0).then_some(d)
    }
}

/// An undirected graph with real edge weights and no self-loops.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: UnGraph<usize, f64>,
    weighted: bool,
}

impl WeightedGraph {
    /// Build a weighted graph on nodes `0..node_count`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] for self-loops, out-of-range
    /// endpoints, duplicate edges, or non-finite weights.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        Self::build(node_count, edges, true)
    }

    /// Build an unweighted graph: every edge carries weight `1.0`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`WeightedGraph::from_edges`].
    pub fn from_unweighted_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self::build(
            node_count,
            edges.into_iter().map(|(a, b)| (a, b, 1.0)),
            false,
        )
    }

    fn build<I>(node_count: usize, edges: I, weighted: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut graph = UnGraph::<usize, f64>::with_capacity(node_count, node_count * 3);
        for i in 0..node_count {
            graph.add_node(i);
        }

        for (a, b, w) in edges {
            if a >= node_count || b >= node_count {
                return Err(NetworkError::invalid_input(format!(
                    "edge ({a}, {b}) out of range for {node_count} nodes"
                )));
            }
            if a == b {
                return Err(NetworkError::invalid_input(format!("self-loop on node {a}")));
            }
            if !w.is_finite() {
                return Err(NetworkError::invalid_input(format!(
                    "edge ({a}, {b}) has non-finite weight"
                )));
            }
            let (na, nb) = (NodeIndex::new(a), NodeIndex::new(b));
            if graph.find_edge(na, nb).is_some() {
                return Err(NetworkError::invalid_input(format!("duplicate edge ({a}, {b})")));
            }
            graph.add_edge(na, nb, w);
        }

        Ok(Self { graph, weighted })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `false` for graphs built with [`WeightedGraph::from_unweighted_edges`].
    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Weight of edge `{i, j}`, if present.
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.node_count() || j >= self.node_count() {
            return None;
        }
        self.graph
            .find_edge(NodeIndex::new(i), NodeIndex::new(j))
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    #[must_use]
    pub fn contains_edge(&self, i: usize, j: usize) -> bool {
        self.weight(i, j).is_some()
    }

    /// Neighbours of `node` with the connecting edge weight.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let idx = NodeIndex::new(node);
        self.graph.edges(idx).map(move |e| {
            let other = if e.source() == idx { e.target() } else { e.source() };
            (other.index(), *e.weight())
        })
    }

    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.graph.edges(NodeIndex::new(node)).count()
    }

    /// All edges as `(i, j, w)` with `i < j`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut out: Vec<(usize, usize, f64)> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                (a.min(b), a.max(b), *e.weight())
            })
            .collect();
        out.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        out
    }

    /// Number of connected components (isolated nodes count as one each).
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.node_count() > 0 && self.component_count() == 1
    }

    /// The subgraph induced by `nodes`. Node `k` of the result is `nodes[k]`.
    #[must_use]
    pub fn induced_subgraph(&self, nodes: &[usize]) -> Self {
        let mut graph = UnGraph::<usize, f64>::with_capacity(nodes.len(), nodes.len() * 3);
        for k in 0..nodes.len() {
            graph.add_node(k);
        }
        for (a, &u) in nodes.iter().enumerate() {
            for (b, &v) in nodes.iter().enumerate().skip(a + 1) {
                if let Some(w) = self.weight(u, v) {
                    graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
                }
            }
        }
        Self {
            graph,
            weighted: self.weighted,
        }
    }

    /// Dense symmetric adjacency matrix with zero diagonal.
    #[must_use]
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut adj = DMatrix::zeros(n, n);
        for (i, j, w) in self.edges() {
            adj[(i, j)] = w;
            adj[(j, i)] = w;
        }
        adj
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub const fn inner(&self) -> &UnGraph<usize, f64> {
        &self.graph
    }
}

impl PartialEq for WeightedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.weighted == other.weighted
            && self.node_count() == other.node_count()
            && self.edges() == other.edges()
    }
}
