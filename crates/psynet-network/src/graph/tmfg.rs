//! Triangulated Maximally Filtered Graph construction.
//!
//! # Overview
//!
//! TMFG keeps the strongest `3n - 6` associations of a dense `n × n`
//! correlation (or covariance) matrix while forcing the result to be a
//! planar triangulation. The graph is grown from a four-node tetrahedron by
//! repeatedly inserting the remaining node that adds the most absolute
//! weight into one of the current triangular faces.
//!
//! # Algorithm
//!
//! 1. Pick the seed quartet ([`crate::graph::seed`]) and add its 6 edges.
//!    Its four triangles are the initial faces.
//! 2. For every face, cache the remaining node with the largest gain (sum of
//!    absolute weights to the face's three corners). Faces are rescored in
//!    parallel; only faces whose cached node was just inserted, plus the
//!    three newly created faces, need rescoring.
//! 3. Pick the best `(face, node)` pair: highest gain, then lowest node
//!    index, then lowest face index. Connect the node to the three corners
//!    and split the face into three.
//! 4. Stop when every node has been inserted.
//!
//! Every insertion creates the four-clique `face ∪ {node}` separated from the
//! rest of the graph by the face itself. The construction record therefore
//! doubles as the junction tree used by LoGo (see
//! [`crate::topology::JunctionTree`]).

use nalgebra::DMatrix;
use psynet_core::config::TmfgConfig;
use psynet_core::correlation::correlation;
use psynet_core::model::matrix::validate_symmetric;
use psynet_core::model::{AssociationMatrix, ObservationMatrix, WeightedGraph};
use psynet_core::{NetworkError, Result};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::graph::seed::select_seed;
use crate::topology::JunctionTree;

/// Smallest item count TMFG construction accepts.
pub const MIN_NODES: usize = 9;

/// A TMFG together with its construction record.
#[derive(Debug, Clone, PartialEq)]
pub struct Tmfg {
    graph: WeightedGraph,
    seed: [usize; 4],
    insertion_order: Vec<usize>,
    cliques: Vec<[usize; 4]>,
    separators: Vec<[usize; 3]>,
}

impl Tmfg {
    /// Correlate `observations` and filter the result.
    ///
    /// # Errors
    ///
    /// Propagates correlation failures and [`build_tmfg`] failures.
    pub fn from_observations(observations: &ObservationMatrix, config: &TmfgConfig) -> Result<Self> {
        build_tmfg(&correlation(observations)?, config)
    }

    /// The filtered graph, weighted by the input matrix entries.
    #[must_use]
    pub const fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    /// The seed quartet in ascending order.
    #[must_use]
    pub const fn seed(&self) -> [usize; 4] {
        self.seed
    }

    /// Nodes in insertion order; the four seed nodes come first.
    #[must_use]
    pub fn insertion_order(&self) -> &[usize] {
        &self.insertion_order
    }

    /// The `n - 3` tetrahedral cliques, each sorted ascending.
    #[must_use]
    pub fn cliques(&self) -> &[[usize; 4]] {
        &self.cliques
    }

    /// The `n - 4` triangular separators, each sorted ascending.
    #[must_use]
    pub fn separators(&self) -> &[[usize; 3]] {
        &self.separators
    }

    /// The construction record as a junction tree.
    #[must_use]
    pub fn junction_tree(&self) -> JunctionTree {
        JunctionTree::new(
            self.cliques.iter().map(|c| c.to_vec()).collect(),
            self.separators.iter().map(|s| s.to_vec()).collect(),
        )
    }
}

/// Build the TMFG of a validated correlation or covariance matrix.
///
/// # Errors
///
/// Returns [`NetworkError::InsufficientNodes`] for fewer than [`MIN_NODES`]
/// items and [`NetworkError::InvalidParameter`] if the seed strategy refuses
/// the input size.
#[instrument(skip(matrix, config), fields(n = matrix.dim(), seed = ?config.seed))]
pub fn build_tmfg(matrix: &AssociationMatrix, config: &TmfgConfig) -> Result<Tmfg> {
    construct(matrix.values(), config)
}

/// Build the TMFG of a raw matrix, validating it first.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] if `values` is not square,
/// symmetric and finite, plus every failure of [`build_tmfg`].
pub fn build_tmfg_from_values(values: &DMatrix<f64>, config: &TmfgConfig) -> Result<Tmfg> {
    validate_symmetric(values)?;
    construct(values, config)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: usize,
    gain: f64,
}

impl Candidate {
    fn beats(self, other: Self) -> bool {
        self.gain > other.gain || (self.gain == other.gain && self.node < other.node)
    }
}

#[derive(Debug, Clone)]
struct Face {
    corners: [usize; 3],
    best: Option<Candidate>,
}

impl Face {
    const fn new(corners: [usize; 3]) -> Self {
        Self { corners, best: None }
    }
}

fn construct(values: &DMatrix<f64>, config: &TmfgConfig) -> Result<Tmfg> {
    let n = values.nrows();
    if n < MIN_NODES {
        return Err(NetworkError::InsufficientNodes {
            required: MIN_NODES,
            actual: n,
        });
    }

    let abs = values.map(f64::abs);
    let seed = select_seed(&abs, config)?;
    let [s0, s1, s2, s3] = seed;
    debug!(?seed, "selected seed tetrahedron");

    let mut remaining: Vec<usize> = (0..n).filter(|v| !seed.contains(v)).collect();
    let mut insertion_order = seed.to_vec();
    insertion_order.reserve(remaining.len());

    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(3 * n - 6);
    for (k, &a) in seed.iter().enumerate() {
        for &b in &seed[k + 1..] {
            edges.push((a, b));
        }
    }

    let mut faces = vec![
        Face::new([s0, s1, s2]),
        Face::new([s0, s1, s3]),
        Face::new([s0, s2, s3]),
        Face::new([s1, s2, s3]),
    ];
    let mut stale: Vec<usize> = (0..faces.len()).collect();

    let mut cliques = vec![seed];
    let mut separators = Vec::with_capacity(n - 4);

    while !remaining.is_empty() {
        let rescored: Vec<(usize, Option<Candidate>)> = stale
            .par_iter()
            .map(|&f| (f, best_candidate(faces[f].corners, &remaining, &abs)))
            .collect();
        for (f, best) in rescored {
            faces[f].best = best;
        }

        let Some((face_idx, chosen)) = pick_insertion(&faces) else {
            // Unreachable while nodes remain: every face has a candidate.
            return Err(NetworkError::invalid_input(
                "no face accepted a remaining node",
            ));
        };

        let v = chosen.node;
        let [a, b, c] = faces[face_idx].corners;
        if let Ok(pos) = remaining.binary_search(&v) {
            remaining.remove(pos);
        }
        insertion_order.push(v);
        edges.extend([(v, a), (v, b), (v, c)]);

        let mut clique = [a, b, c, v];
        clique.sort_unstable();
        cliques.push(clique);
        let mut separator = [a, b, c];
        separator.sort_unstable();
        separators.push(separator);

        faces[face_idx] = Face::new([a, b, v]);
        faces.push(Face::new([a, c, v]));
        faces.push(Face::new([b, c, v]));

        stale.clear();
        stale.push(face_idx);
        stale.extend([faces.len() - 2, faces.len() - 1]);
        stale.extend(
            faces
                .iter()
                .enumerate()
                .filter(|(i, f)| *i != face_idx && f.best.is_some_and(|cand| cand.node == v))
                .map(|(i, _)| i),
        );
    }

    debug!(edges = edges.len(), faces = faces.len(), "triangulation complete");

    let graph = WeightedGraph::from_edges(
        n,
        edges.into_iter().map(|(a, b)| (a, b, values[(a, b)])),
    )?;

    Ok(Tmfg {
        graph,
        seed,
        insertion_order,
        cliques,
        separators,
    })
}

/// Remaining node with the highest gain against `corners`; lowest index wins
/// ties because `remaining` is ascending and only a strict improvement
/// replaces the incumbent.
fn best_candidate(corners: [usize; 3], remaining: &[usize], abs: &DMatrix<f64>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for &node in remaining {
        let gain = abs[(node, corners[0])] + abs[(node, corners[1])] + abs[(node, corners[2])];
        let cand = Candidate { node, gain };
        if best.is_none_or(|b| cand.beats(b)) {
            best = Some(cand);
        }
    }
    best
}

fn pick_insertion(faces: &[Face]) -> Option<(usize, Candidate)> {
    let mut chosen: Option<(usize, Candidate)> = None;
    for (i, face) in faces.iter().enumerate() {
        let Some(cand) = face.best else { continue };
        if chosen.is_none_or(|(_, incumbent)| cand.beats(incumbent)) {
            chosen = Some((i, cand));
        }
    }
    chosen
}
