//! Local metrics: degree and strength.

use psynet_core::model::{CentralityVector, WeightedGraph};

/// Number of incident edges per node.
#[must_use]
pub fn degree(graph: &WeightedGraph) -> CentralityVector {
    CentralityVector::new(
        (0..graph.node_count())
            .map(|v| graph.degree(v) as f64)
            .collect(),
    )
}

/// Sum of absolute incident edge weights per node.
///
/// Negative associations count by magnitude, so strongly anti-correlated
/// items are as central as strongly correlated ones.
#[must_use]
pub fn strength(graph: &WeightedGraph) -> CentralityVector {
    CentralityVector::new(
        (0..graph.node_count())
            .map(|v| graph.neighbors(v).map(|(_, w)| w.abs()).sum())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_and_strength() {
        let g = WeightedGraph::from_edges(4, [(0, 1, 0.5), (0, 2, -0.25), (1, 2, 0.1)])
            .expect("valid");
        assert_eq!(degree(&g).as_slice(), &[2.0, 2.0, 2.0, 0.0]);

        let s = strength(&g);
        assert!((s.as_slice()[0] - 0.75).abs() < 1e-12);
        assert!((s.as_slice()[1] - 0.6).abs() < 1e-12);
        assert_eq!(s.get(3), Some(0.0));
    }

    #[test]
    fn unweighted_strength_equals_degree() {
        let g = WeightedGraph::from_unweighted_edges(3, [(0, 1), (1, 2)]).expect("valid");
        assert_eq!(strength(&g), degree(&g));
    }
}
