//! Known-topology regression tests for the centrality metrics.
//!
//! Expected values are worked out by hand for small graphs; the TMFG tests
//! check invariants that hold for any input.

mod support;

use psynet_core::config::TmfgConfig;
use psynet_core::model::{DistanceTransform, WeightedGraph};
use psynet_core::stats::spearman;
use psynet_network::graph::Tmfg;
use psynet_network::metrics::{
    closeness, degree, randomized_shortest_paths_betweenness, shortest_path_lengths,
    standard_betweenness, strength,
};
use psynet_network::score::community_closeness;

use support::factor_data;

// ---------------------------------------------------------------------------
// Helper: two K4 clusters joined through node 4
// ---------------------------------------------------------------------------

fn barbell() -> WeightedGraph {
    let mut edges = Vec::new();
    for cluster in [[0, 1, 2, 3], [5, 6, 7, 8]] {
        for (k, &a) in cluster.iter().enumerate() {
            for &b in &cluster[k + 1..] {
                edges.push((a, b));
            }
        }
    }
    edges.extend([(3, 4), (4, 5)]);
    WeightedGraph::from_unweighted_edges(9, edges).expect("valid")
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i)
}

#[test]
fn barbell_bridge_has_highest_betweenness() {
    let bc = standard_betweenness(&barbell(), DistanceTransform::Inverse);
    // 4 separates the two clusters: 4 × 4 pairs.
    assert!((bc.as_slice()[4] - 16.0).abs() < 1e-9);
    // 3 separates {0, 1, 2} from the 5 nodes beyond it.
    assert!((bc.as_slice()[3] - 15.0).abs() < 1e-9);
    assert!(bc.as_slice()[0].abs() < 1e-9);
    assert_eq!(argmax(bc.as_slice()), 4);
}

#[test]
fn barbell_rsp_favours_the_bridge_over_cluster_interiors() {
    let rsp = randomized_shortest_paths_betweenness(&barbell(), 3.0, DistanceTransform::Inverse)
        .expect("valid beta");
    let v = rsp.as_slice();
    assert!(v[4] > 10.0 * v[0]);
    assert!(v[4] >= 16.0 - 1e-6, "every cross pair passes node 4 at least once");
    assert!((v[0] - v[8]).abs() < 1e-9);
}

#[test]
fn barbell_bridge_is_closest() {
    let c = closeness(&barbell(), false, DistanceTransform::Inverse).expect("unweighted");
    // Node 4: two neighbours at 1, six nodes at 2.
    assert!((c.as_slice()[4] - 8.0 / 14.0).abs() < 1e-12);
    assert_eq!(argmax(c.as_slice()), 4);
}

#[test]
fn tmfg_centralities_are_finite_and_non_negative() {
    let data = factor_data(3, 5, 300, 0.5, 41);
    let tmfg = Tmfg::from_observations(&data.observations, &TmfgConfig::default())
        .expect("15 items");
    let g = tmfg.graph();

    let vectors = [
        standard_betweenness(g, DistanceTransform::Inverse),
        standard_betweenness(g, DistanceTransform::NegLog),
        randomized_shortest_paths_betweenness(g, 0.01, DistanceTransform::Inverse)
            .expect("valid beta"),
        randomized_shortest_paths_betweenness(g, 1.0, DistanceTransform::Complement)
            .expect("valid beta"),
        closeness(g, true, DistanceTransform::Inverse).expect("weighted"),
        degree(g),
        strength(g),
    ];
    for v in &vectors {
        assert_eq!(v.len(), 15);
        assert!(v.as_slice().iter().all(|x| x.is_finite() && *x >= 0.0));
    }

    // Every TMFG node sits in at least one tetrahedron.
    assert!(degree(g).as_slice().iter().all(|&d| d >= 3.0));
}

#[test]
fn tmfg_rsp_approaches_shortest_paths_as_beta_grows() {
    let data = factor_data(3, 5, 300, 0.5, 41);
    let tmfg = Tmfg::from_observations(&data.observations, &TmfgConfig::default())
        .expect("15 items");
    let g = tmfg.graph();
    let sp = standard_betweenness(g, DistanceTransform::Inverse);

    // Edge costs are 2 to 10 here, so multi-hop walk weights fall far below
    // f64 range at the top of the sweep.
    let mut previous: Option<(f64, f64)> = None;
    for beta in [20.0, 50.0, 100.0, 300.0] {
        let rsp = randomized_shortest_paths_betweenness(g, beta, DistanceTransform::Inverse)
            .expect("valid beta");
        let gap = rsp
            .as_slice()
            .iter()
            .zip(sp.as_slice())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        let rho = spearman(rsp.as_slice(), sp.as_slice()).expect("same length");

        assert!(
            (rsp.sum() - sp.sum()).abs() < 0.05 * sp.sum(),
            "beta {beta}: rsp sum {} vs {}",
            rsp.sum(),
            sp.sum()
        );
        if let Some((prev_gap, prev_rho)) = previous {
            assert!(gap <= prev_gap + 1e-6, "beta {beta}: gap {gap} after {prev_gap}");
            assert!(rho >= prev_rho - 0.02, "beta {beta}: rho {rho} after {prev_rho}");
        }
        previous = Some((gap, rho));
    }

    let (_, rho) = previous.expect("swept");
    assert!(rho > 0.9, "rank agreement {rho}");
}

#[test]
fn tmfg_shortest_paths_are_symmetric_metric() {
    let data = factor_data(3, 5, 200, 0.5, 43);
    let tmfg = Tmfg::from_observations(&data.observations, &TmfgConfig::default())
        .expect("15 items");
    let d = shortest_path_lengths(tmfg.graph(), true, DistanceTransform::Inverse)
        .expect("weighted");

    for i in 0..15 {
        assert_eq!(d[(i, i)], 0.0);
        for j in 0..15 {
            assert!(d[(i, j)].is_finite());
            assert!((d[(i, j)] - d[(j, i)]).abs() < 1e-9);
            for k in 0..15 {
                assert!(d[(i, j)] <= d[(i, k)] + d[(k, j)] + 1e-9);
            }
        }
    }
}

#[test]
fn community_closeness_ignores_label_names() {
    let data = factor_data(3, 5, 300, 0.5, 47);
    let tmfg = Tmfg::from_observations(&data.observations, &TmfgConfig::default())
        .expect("15 items");

    let renamed = psynet_core::model::Partition::new(
        (0..15).map(|i| ["gamma", "alpha", "beta"][i / 5]),
    )
    .expect("labels");

    let original =
        community_closeness(tmfg.graph(), &data.partition, true, DistanceTransform::Inverse)
            .expect("valid");
    let relabelled =
        community_closeness(tmfg.graph(), &renamed, true, DistanceTransform::Inverse)
            .expect("valid");

    assert!((original["0"] - relabelled["gamma"]).abs() < 1e-12);
    assert!((original["1"] - relabelled["alpha"]).abs() < 1e-12);
    assert!((original["2"] - relabelled["beta"]).abs() < 1e-12);
}
