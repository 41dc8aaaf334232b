//! Closeness centrality.
//!
//! A node's closeness is the number of nodes it can reach divided by the sum
//! of its distances to them. Using the reachable count rather than `n - 1`
//! keeps the value meaningful on disconnected graphs; a node that reaches
//! nothing scores 0.

use psynet_core::model::{CentralityVector, DistanceTransform, WeightedGraph};
use psynet_core::Result;
use rayon::prelude::*;
use tracing::instrument;

use super::paths::{check_weighted, dijkstra, length_adjacency};

/// Closeness of every node.
///
/// With `weighted = false` every edge has length 1.
///
/// # Errors
///
/// Returns [`psynet_core::NetworkError::InvalidParameter`] if `weighted` is
/// requested on an unweighted graph.
#[instrument(skip(graph), fields(n = graph.node_count()))]
pub fn closeness(
    graph: &WeightedGraph,
    weighted: bool,
    transform: DistanceTransform,
) -> Result<CentralityVector> {
    check_weighted(graph, weighted)?;
    let adjacency = length_adjacency(graph, weighted, transform);

    let values: Vec<f64> = (0..adjacency.len())
        .into_par_iter()
        .map(|s| {
            let dist = dijkstra(&adjacency, s);
            let (reached, total) = dist
                .iter()
                .enumerate()
                .filter(|&(t, d)| t != s && d.is_finite())
                .fold((0_usize, 0.0_f64), |(c, sum), (_, d)| (c + 1, sum + d));
            if total > 0.0 {
                reached as f64 / total
            } else {
                0.0
            }
        })
        .collect();

    Ok(CentralityVector::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use psynet_core::NetworkError;

    #[test]
    fn path_is_closest_at_the_centre() {
        let g = WeightedGraph::from_unweighted_edges(5, (0..4).map(|i| (i, i + 1))).expect("valid");
        let c = closeness(&g, false, DistanceTransform::Inverse).expect("unweighted");
        let v = c.as_slice();
        // Centre: 4 / (1 + 1 + 2 + 2).
        assert!((v[2] - 4.0 / 6.0).abs() < 1e-12);
        // End: 4 / (1 + 2 + 3 + 4).
        assert!((v[0] - 0.4).abs() < 1e-12);
        assert!(v[2] > v[1] && v[1] > v[0]);
    }

    #[test]
    fn isolated_node_scores_zero() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 0.5)]).expect("valid");
        let c = closeness(&g, true, DistanceTransform::Inverse).expect("weighted");
        assert_eq!(c.get(2), Some(0.0));
        // Each endpoint reaches one node at distance 2.
        assert!((c.as_slice()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn weighted_uses_transformed_lengths() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 0.5), (1, 2, 0.25)]).expect("valid");
        let c = closeness(&g, true, DistanceTransform::Inverse).expect("weighted");
        // Node 1: 2 / (2 + 4).
        assert!((c.as_slice()[1] - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_on_unweighted_graph_is_rejected() {
        let g = WeightedGraph::from_unweighted_edges(3, [(0, 1), (1, 2)]).expect("valid");
        assert!(matches!(
            closeness(&g, true, DistanceTransform::Inverse),
            Err(NetworkError::InvalidParameter { .. })
        ));
    }
}
