//! Assignment of items to communities.

use std::collections::BTreeMap;

use crate::error::{NetworkError, Result};

/// One community label per node.
///
/// Labels are free-form strings; integer memberships (as produced by most
/// community detection routines) are converted with
/// [`Partition::from_memberships`]. Labels need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    labels: Vec<String>,
}

impl Partition {
    /// Build from per-node labels.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if there are no nodes or a
    /// label is empty.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(NetworkError::invalid_input("partition has no nodes"));
        }
        if let Some(node) = labels.iter().position(String::is_empty) {
            return Err(NetworkError::invalid_input(format!(
                "node {node} has an empty community label"
            )));
        }
        Ok(Self { labels })
    }

    /// Build from integer memberships.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if `memberships` is empty.
    pub fn from_memberships(memberships: &[u32]) -> Result<Self> {
        Self::new(memberships.iter().map(ToString::to_string))
    }

    /// Number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of `node`.
    #[must_use]
    pub fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Community label → ascending member list.
    #[must_use]
    pub fn communities(&self) -> BTreeMap<&str, Vec<usize>> {
        let mut out: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (node, label) in self.labels.iter().enumerate() {
            out.entry(label.as_str()).or_default().push(node);
        }
        out
    }

    #[must_use]
    pub fn community_count(&self) -> usize {
        self.communities().len()
    }

    /// Fail unless the partition covers exactly `node_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] on a size mismatch.
    pub fn ensure_covers(&self, node_count: usize) -> Result<()> {
        if self.labels.len() == node_count {
            Ok(())
        } else {
            Err(NetworkError::invalid_input(format!(
                "partition labels {} nodes but the graph has {node_count}",
                self.labels.len()
            )))
        }
    }
}
