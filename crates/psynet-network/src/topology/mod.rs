//! Junction-tree decomposition and LoGo sparse precision estimation.
//!
//! # Overview
//!
//! A chordal (decomposable) graph factors into maximal cliques glued along
//! separators. For a Gaussian model Markov to such a graph the precision
//! matrix is the sum of the inverted clique covariance blocks minus the sum
//! of the inverted separator blocks, each embedded at its own indices
//! ([`logo`]).
//!
//! The decomposition is held as plain index arrays ([`JunctionTree`]) rather
//! than a linked tree: LoGo only ever needs to visit every block once, and
//! flat arrays let those visits run in parallel.
//!
//! A TMFG is a planar 3-tree: its maximal cliques are the tetrahedra created
//! by each insertion and its separators are the faces the insertions split.
//! [`crate::graph::Tmfg::junction_tree`] returns that record directly;
//! [`JunctionTree::from_graph`] recovers the same decomposition for any
//! chordal graph.

pub mod logo;

use fixedbitset::FixedBitSet;
use psynet_core::model::WeightedGraph;
use psynet_core::{NetworkError, Result};
use tracing::{debug, instrument};

pub use logo::{build_precision, build_precision_with_tree};

/// Maximal cliques and separators of a chordal graph as index lists.
///
/// Each list is sorted ascending. There is one separator per clique except
/// the first clique of every connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionTree {
    cliques: Vec<Vec<usize>>,
    separators: Vec<Vec<usize>>,
}

impl JunctionTree {
    /// Wrap precomputed cliques and separators.
    #[must_use]
    pub fn new(mut cliques: Vec<Vec<usize>>, mut separators: Vec<Vec<usize>>) -> Self {
        for c in cliques.iter_mut().chain(separators.iter_mut()) {
            c.sort_unstable();
        }
        Self {
            cliques,
            separators,
        }
    }

    /// Decompose a chordal graph with maximum cardinality search.
    ///
    /// Nodes are visited in order of how many already-visited neighbours
    /// they have (lowest index wins ties). A new clique starts whenever
    /// that count fails to grow; its separator is the visited neighbourhood
    /// of the node that starts it.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if the graph is not chordal,
    /// i.e. some node's visited neighbourhood is not complete.
    #[instrument(skip(graph), fields(n = graph.node_count(), m = graph.edge_count()))]
    pub fn from_graph(graph: &WeightedGraph) -> Result<Self> {
        let n = graph.node_count();
        let adjacency = adjacency_bits(graph);

        let mut visited = FixedBitSet::with_capacity(n);
        let mut card = vec![0_usize; n];
        let mut prev_card = 0_usize;

        let mut cliques: Vec<Vec<usize>> = Vec::new();
        let mut separators: Vec<Vec<usize>> = Vec::new();
        let mut current: Option<Vec<usize>> = None;

        for _ in 0..n {
            let Some(v) = (0..n)
                .filter(|&u| !visited.contains(u))
                .max_by(|&a, &b| card[a].cmp(&card[b]).then(b.cmp(&a)))
            else {
                break;
            };

            // ones() is ascending, so madj is sorted.
            let madj: Vec<usize> = adjacency[v]
                .ones()
                .filter(|&u| visited.contains(u))
                .collect();

            for (k, &a) in madj.iter().enumerate() {
                if let Some(&b) = madj[k + 1..].iter().find(|&&b| !adjacency[a].contains(b)) {
                    return Err(NetworkError::invalid_input(format!(
                        "topology is not chordal: neighbours {a} and {b} of node {v} are not adjacent"
                    )));
                }
            }

            let new_card = card[v];
            match current.take() {
                Some(mut clique) if new_card > prev_card => {
                    clique.push(v);
                    current = Some(clique);
                }
                finished => {
                    cliques.extend(finished);
                    let mut clique = madj.clone();
                    clique.push(v);
                    current = Some(clique);
                    if new_card > 0 {
                        separators.push(madj);
                    }
                }
            }

            visited.insert(v);
            for u in adjacency[v].ones() {
                if !visited.contains(u) {
                    card[u] += 1;
                }
            }
            prev_card = new_card;
        }

        if let Some(done) = current {
            cliques.push(done);
        }

        debug!(
            cliques = cliques.len(),
            separators = separators.len(),
            "junction tree decomposed"
        );
        Ok(Self::new(cliques, separators))
    }

    #[must_use]
    pub fn cliques(&self) -> &[Vec<usize>] {
        &self.cliques
    }

    #[must_use]
    pub fn separators(&self) -> &[Vec<usize>] {
        &self.separators
    }

    /// Largest node index referenced, if any.
    #[must_use]
    pub fn max_node(&self) -> Option<usize> {
        self.cliques
            .iter()
            .chain(&self.separators)
            .filter_map(|c| c.last().copied())
            .max()
    }

    /// Every unordered pair covered by some clique, as `(i, j)` with
    /// `i < j`, sorted and deduplicated.
    #[must_use]
    pub fn covered_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .cliques
            .iter()
            .flat_map(|c| {
                c.iter()
                    .enumerate()
                    .flat_map(move |(k, &a)| c[k + 1..].iter().map(move |&b| (a, b)))
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

/// `true` if the graph is chordal.
#[must_use]
pub fn is_chordal(graph: &WeightedGraph) -> bool {
    JunctionTree::from_graph(graph).is_ok()
}

fn adjacency_bits(graph: &WeightedGraph) -> Vec<FixedBitSet> {
    let n = graph.node_count();
    let mut rows = vec![FixedBitSet::with_capacity(n); n];
    for (i, j, _) in graph.edges() {
        rows[i].insert(j);
        rows[j].insert(i);
    }
    rows
}
