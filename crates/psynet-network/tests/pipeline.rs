//! End-to-end run on a six-factor simple-structure design: 48 items, eight
//! per community, within-community correlation 0.6, 500 subjects.

mod support;

use psynet_core::config::{AnalysisConfig, ItemWeighting, ScoreConfig};
use psynet_core::correlation::covariance;
use psynet_core::stats::{mean, sample_sd};
use psynet_network::graph::Tmfg;
use psynet_network::metrics::{randomized_shortest_paths_betweenness, standard_betweenness};
use psynet_network::score::{aggregate_scores, community_closeness, score_agreement};
use psynet_network::topology::build_precision_with_tree;

use support::{FactorData, factor_data};

fn design() -> FactorData {
    factor_data(6, 8, 500, 0.6, 2024)
}

#[test]
fn full_pipeline_separates_communities() {
    let data = design();
    let cfg = AnalysisConfig::default();

    let tmfg = Tmfg::from_observations(&data.observations, &cfg.tmfg).expect("48 items");
    assert_eq!(tmfg.graph().edge_count(), 3 * 48 - 6);

    let cov = covariance(&data.observations).expect("500 subjects");
    let precision = build_precision_with_tree(&cov, &tmfg.junction_tree()).expect("invertible");
    let pcor = precision.partial_correlations();

    let p = &data.partition;
    let (mut within, mut cross) = (Vec::new(), Vec::new());
    for &(i, j) in precision.support() {
        let r = pcor[(i, j)].abs();
        if p.label(i) == p.label(j) {
            within.push(r);
        } else {
            cross.push(r);
        }
    }
    assert!(!within.is_empty() && !cross.is_empty());
    // Cross-community partial correlations are sampling noise around zero
    // (sd about 1/sqrt(500)); within-community ones carry the factor.
    let max_cross = cross.iter().copied().fold(0.0_f64, f64::max);
    assert!(mean(&cross) < 0.05, "cross mean {}", mean(&cross));
    assert!(max_cross < 0.15, "cross max {max_cross}");
    assert!(mean(&within) > 0.1, "within mean {}", mean(&within));

    let bc = standard_betweenness(tmfg.graph(), cfg.centrality.distance);
    let rsp = randomized_shortest_paths_betweenness(
        tmfg.graph(),
        cfg.centrality.rsp_beta,
        cfg.centrality.distance,
    )
    .expect("default beta is valid");
    assert_eq!(bc.len(), 48);
    assert_eq!(rsp.len(), 48);
    assert!(rsp.sum() > 0.0);

    let cc = community_closeness(
        tmfg.graph(),
        p,
        cfg.centrality.weighted_closeness,
        cfg.centrality.distance,
    )
    .expect("partition covers graph");
    assert_eq!(cc.len(), 6);
    assert!(cc.values().all(|&v| v > 0.0));
}

#[test]
fn community_scores_track_their_latent_factors() {
    let data = design();
    let tmfg = Tmfg::from_observations(&data.observations, &AnalysisConfig::default().tmfg)
        .expect("48 items");

    for weighting in [ItemWeighting::Strength, ItemWeighting::Betweenness, ItemWeighting::Equal] {
        let cfg = ScoreConfig {
            item_weighting: weighting,
            ..ScoreConfig::default()
        };
        let scores = aggregate_scores(&data.observations, tmfg.graph(), &data.partition, &cfg)
            .expect("valid");
        assert_eq!(scores.labels().len(), 6);
        // Betweenness can concentrate a community's weight on a few items;
        // a single item still correlates sqrt(0.6) with its factor.
        let floor = if weighting == ItemWeighting::Betweenness { 0.7 } else { 0.9 };

        for (c, latent) in data.latent.iter().enumerate() {
            let label = c.to_string();
            let community = scores.community(&label).expect("label present");
            assert!(mean(&community).abs() < 1e-9);
            assert!((sample_sd(&community) - 1.0).abs() < 1e-9);

            let agreement = score_agreement(&community, latent).expect("same length");
            assert!(
                agreement.pearson > floor,
                "{weighting:?} community {label}: r = {}",
                agreement.pearson
            );
            assert!(agreement.rmse <= (2.0 * (1.0 - agreement.pearson)).sqrt() + 1e-9);
        }

        let overall = scores.overall();
        assert_eq!(overall.len(), 500);
        assert!(mean(overall).abs() < 1e-9);
        assert!((sample_sd(overall) - 1.0).abs() < 1e-9);
    }
}
