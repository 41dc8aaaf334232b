//! Community-level closeness.

use std::collections::BTreeMap;

use psynet_core::model::{DistanceTransform, Partition, WeightedGraph};
use psynet_core::Result;
use tracing::instrument;

use crate::metrics::closeness::closeness;

/// Mean closeness of each community's members, keyed by label.
///
/// Closeness is computed once on the full graph, so a community's value
/// reflects how near its items are to every item, not only to each other.
///
/// # Errors
///
/// - [`psynet_core::NetworkError::InvalidInput`] if the partition does not
///   cover exactly the graph's nodes.
/// - [`psynet_core::NetworkError::InvalidParameter`] if `weighted` is
///   requested on an unweighted graph.
#[instrument(skip(graph, partition), fields(n = graph.node_count(), communities = partition.community_count()))]
pub fn community_closeness(
    graph: &WeightedGraph,
    partition: &Partition,
    weighted: bool,
    transform: DistanceTransform,
) -> Result<BTreeMap<String, f64>> {
    partition.ensure_covers(graph.node_count())?;
    let cc = closeness(graph, weighted, transform)?;

    Ok(partition
        .communities()
        .into_iter()
        .map(|(label, members)| {
            let total: f64 = members.iter().map(|&v| cc.as_slice()[v]).sum();
            (label.to_string(), total / members.len() as f64)
        })
        .collect())
}
