//! End-to-end scenario: synthetic data through TMFG, LoGo, centrality, and
//! community scoring, summarized against the known ground truth.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use psynet_core::config::AnalysisConfig;
use psynet_core::correlation::covariance;
use psynet_core::stats::{mean, pearson, spearman};
use psynet_network::graph::{GraphStats, Tmfg};
use psynet_network::metrics::{randomized_shortest_paths_betweenness, standard_betweenness};
use psynet_network::score::{Agreement, aggregate_scores, community_closeness, score_agreement};
use psynet_network::topology::build_precision_with_tree;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{SyntheticDesign, generate};

/// How many items to list per centrality ranking.
const TOP_ITEMS: usize = 5;

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub design: SyntheticDesign,
    pub graph: GraphStats,
    /// Share of TMFG edges joining two items of the same community.
    pub within_edge_share: f64,
    /// Mean `|partial correlation|` over TMFG edges inside communities.
    pub within_partial_correlation: f64,
    /// Mean `|partial correlation|` over TMFG edges across communities.
    pub cross_partial_correlation: f64,
    /// Largest `|partial correlation|` over TMFG edges across communities.
    pub max_cross_partial_correlation: f64,
    /// Largest `|r|` between two different community scores.
    pub max_cross_score_correlation: f64,
    /// Spearman correlation of RSP and shortest-path betweenness.
    pub betweenness_rank_agreement: f64,
    /// Items with the highest shortest-path betweenness, best first.
    pub top_betweenness: Vec<usize>,
    /// Items with the highest RSP betweenness, best first.
    pub top_rsp_betweenness: Vec<usize>,
    pub community_closeness: BTreeMap<String, f64>,
    /// Agreement of each community score with its true latent factor.
    pub latent_agreement: BTreeMap<String, Agreement>,
}

/// Generate data for `design` and run the full pipeline with `config`.
///
/// # Errors
///
/// Returns an error if the design is invalid or any pipeline stage fails.
#[instrument(skip_all, fields(seed = design.seed, items = design.items()))]
pub fn run_scenario(design: &SyntheticDesign, config: &AnalysisConfig) -> Result<ScenarioReport> {
    let data = generate(design)?;
    let distance = config.centrality.distance;

    let tmfg = Tmfg::from_observations(&data.observations, &config.tmfg)
        .context("TMFG construction failed")?;
    let graph = tmfg.graph();
    let partition = &data.partition;
    let same_community = |i: usize, j: usize| partition.label(i) == partition.label(j);

    let within_edges = graph
        .edges()
        .iter()
        .filter(|&&(i, j, _)| same_community(i, j))
        .count();

    let cov = covariance(&data.observations)?;
    let precision = build_precision_with_tree(&cov, &tmfg.junction_tree())
        .context("LoGo estimation failed")?;
    let pcor = precision.partial_correlations();
    let (mut within, mut cross) = (Vec::new(), Vec::new());
    for &(i, j) in precision.support() {
        let r = pcor[(i, j)].abs();
        if same_community(i, j) {
            within.push(r);
        } else {
            cross.push(r);
        }
    }

    let bc = standard_betweenness(graph, distance);
    let rsp = randomized_shortest_paths_betweenness(graph, config.centrality.rsp_beta, distance)
        .context("RSP betweenness failed")?;
    let closeness = community_closeness(
        graph,
        partition,
        config.centrality.weighted_closeness,
        distance,
    )?;

    let scores = aggregate_scores(&data.observations, graph, partition, &config.scores)
        .context("community scoring failed")?;

    let mut max_cross_score_correlation = 0.0_f64;
    let columns: Vec<Vec<f64>> = scores
        .labels()
        .iter()
        .filter_map(|label| scores.community(label))
        .collect();
    for (a, col_a) in columns.iter().enumerate() {
        for col_b in &columns[a + 1..] {
            let r = pearson(col_a, col_b)?.abs();
            max_cross_score_correlation = max_cross_score_correlation.max(r);
        }
    }

    let mut latent_agreement = BTreeMap::new();
    for (label, latent) in &data.latent {
        if let Some(score) = scores.community(label) {
            latent_agreement.insert(label.clone(), score_agreement(&score, latent)?);
        }
    }

    let report = ScenarioReport {
        design: design.clone(),
        graph: GraphStats::from_graph(graph, distance),
        within_edge_share: ratio(within_edges, graph.edge_count()),
        within_partial_correlation: mean(&within),
        cross_partial_correlation: mean(&cross),
        max_cross_partial_correlation: cross.iter().copied().fold(0.0, f64::max),
        max_cross_score_correlation,
        betweenness_rank_agreement: spearman(bc.as_slice(), rsp.as_slice())?,
        top_betweenness: top_items(bc.as_slice()),
        top_rsp_betweenness: top_items(rsp.as_slice()),
        community_closeness: closeness,
        latent_agreement,
    };

    info!(
        within_edge_share = report.within_edge_share,
        max_cross_score_correlation = report.max_cross_score_correlation,
        "scenario complete"
    );
    Ok(report)
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Indices of the largest values, best first; lower index wins ties.
fn top_items(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]).then(a.cmp(&b)));
    order.truncate(TOP_ITEMS);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_items_prefers_larger_then_lower_index() {
        assert_eq!(top_items(&[1.0, 3.0, 3.0, 0.5]), vec![1, 2, 0, 3]);
        assert_eq!(top_items(&[0.0; 8]).len(), TOP_ITEMS);
    }

    #[test]
    fn ratio_of_nothing_is_zero() {
        assert_eq!(ratio(0, 0), 0.0);
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }
}
