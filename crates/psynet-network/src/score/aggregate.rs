//! Network-weighted community and overall scores.
//!
//! # Formula
//!
//! For community `c` with members `M_c`:
//!
//! ```text
//! w_k      = centrality of item k inside the subgraph induced by M_c,
//!            rescaled so the weights of M_c sum to 1
//! S_c(s)   = standardize( Σ_{k ∈ M_c} w_k · x_{s,k} )
//! ω_c      = Σ_{k ∈ M_c} strength_k in the full graph
//! O(s)     = standardize( Σ_c ω_c · S_c(s) )
//! ```
//!
//! A community whose items all have zero centrality (for example a single
//! item, or items with no edges among themselves) falls back to equal item
//! weights. The same fallback applies to the community weights `ω_c` of a
//! graph without edges.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use psynet_core::config::{ItemWeighting, ScoreConfig};
use psynet_core::model::{ObservationMatrix, Partition, WeightedGraph};
use psynet_core::stats::standardize;
use psynet_core::{NetworkError, Result};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::metrics::basic::strength;
use crate::metrics::betweenness::standard_betweenness;

/// Standardized community scores and the overall score for every subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkScores {
    labels: Vec<String>,
    /// Subjects × communities, columns in `labels` order.
    #[serde(skip)]
    community_scores: DMatrix<f64>,
    overall: Vec<f64>,
    item_weights: Vec<f64>,
    community_weights: Vec<f64>,
}

impl NetworkScores {
    /// Community labels in column order (ascending).
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Subjects × communities matrix of standardized scores.
    #[must_use]
    pub const fn community_scores(&self) -> &DMatrix<f64> {
        &self.community_scores
    }

    /// Standardized overall score per subject.
    #[must_use]
    pub fn overall(&self) -> &[f64] {
        &self.overall
    }

    /// Weight of each item within its own community; weights of one
    /// community sum to 1.
    #[must_use]
    pub fn item_weights(&self) -> &[f64] {
        &self.item_weights
    }

    /// Weight of each community in the overall score, in `labels` order.
    #[must_use]
    pub fn community_weights(&self) -> &[f64] {
        &self.community_weights
    }

    /// Scores of the community labelled `label`.
    #[must_use]
    pub fn community(&self, label: &str) -> Option<Vec<f64>> {
        let col = self.labels.iter().position(|l| l == label)?;
        Some(self.community_scores.column(col).iter().copied().collect())
    }

    #[must_use]
    pub fn subjects(&self) -> usize {
        self.community_scores.nrows()
    }
}

/// Compute community and overall scores for every subject.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] if the observation, graph, and
/// partition sizes disagree, if there are fewer than two subjects, or if a
/// community or overall score has zero variance across subjects.
#[instrument(skip_all, fields(subjects = observations.subjects(), items = observations.items(), weighting = ?config.item_weighting))]
pub fn aggregate_scores(
    observations: &ObservationMatrix,
    graph: &WeightedGraph,
    partition: &Partition,
    config: &ScoreConfig,
) -> Result<NetworkScores> {
    let items = observations.items();
    if graph.node_count() != items {
        return Err(NetworkError::invalid_input(format!(
            "observations have {items} items but the graph has {} nodes",
            graph.node_count()
        )));
    }
    partition.ensure_covers(items)?;
    let subjects = observations.subjects();
    if subjects < 2 {
        return Err(NetworkError::invalid_input(format!(
            "scores need at least 2 subjects to standardize, got {subjects}"
        )));
    }

    let full_strength = strength(graph);
    let communities: BTreeMap<&str, Vec<usize>> = partition.communities();
    let data = observations.values();

    let mut labels = Vec::with_capacity(communities.len());
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(communities.len());
    let mut community_weights = Vec::with_capacity(communities.len());
    let mut item_weights = vec![0.0; items];

    for (label, members) in &communities {
        let weights = member_weights(graph, members, config, label);
        for (&item, &w) in members.iter().zip(&weights) {
            item_weights[item] = w;
        }

        let raw: Vec<f64> = (0..subjects)
            .map(|s| {
                members
                    .iter()
                    .zip(&weights)
                    .map(|(&item, w)| w * data[(s, item)])
                    .sum()
            })
            .collect();
        let scores = standardize(&raw).map_err(|_| {
            NetworkError::invalid_input(format!(
                "community {label} score has zero variance across subjects"
            ))
        })?;

        labels.push((*label).to_string());
        columns.push(scores);
        community_weights.push(members.iter().map(|&v| full_strength.as_slice()[v]).sum());
    }

    if community_weights.iter().all(|&w| w <= 0.0) {
        warn!("graph has no edge weight; communities weighted equally");
        community_weights.fill(1.0);
    }

    let raw_overall: Vec<f64> = (0..subjects)
        .map(|s| {
            columns
                .iter()
                .zip(&community_weights)
                .map(|(col, w)| w * col[s])
                .sum()
        })
        .collect();
    let overall = standardize(&raw_overall).map_err(|_| {
        NetworkError::invalid_input("overall score has zero variance across subjects")
    })?;

    let community_scores = DMatrix::from_fn(subjects, columns.len(), |s, c| columns[c][s]);
    debug!(communities = labels.len(), "community scores standardized");

    Ok(NetworkScores {
        labels,
        community_scores,
        overall,
        item_weights,
        community_weights,
    })
}

/// Within-community item weights summing to 1.
fn member_weights(
    graph: &WeightedGraph,
    members: &[usize],
    config: &ScoreConfig,
    label: &str,
) -> Vec<f64> {
    let raw: Vec<f64> = match config.item_weighting {
        ItemWeighting::Equal => vec![1.0; members.len()],
        ItemWeighting::Strength => strength(&graph.induced_subgraph(members)).into_vec(),
        ItemWeighting::Betweenness => {
            standard_betweenness(&graph.induced_subgraph(members), config.distance).into_vec()
        }
    };

    let total: f64 = raw.iter().sum();
    if total > 0.0 && total.is_finite() {
        return raw.into_iter().map(|w| w / total).collect();
    }

    if config.item_weighting != ItemWeighting::Equal {
        warn!(community = label, "all item weights are zero; using equal weights");
    }
    vec![1.0 / members.len() as f64; members.len()]
}
