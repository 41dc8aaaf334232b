//! Graph filtering for dense association matrices.
//!
//! # Overview
//!
//! This module turns a dense `n × n` correlation or covariance matrix into a
//! sparse, planar, chordal [`WeightedGraph`] with exactly `3n - 6` edges.
//! The graph feeds the LoGo estimator in [`crate::topology`] and every
//! centrality measure in [`crate::metrics`].
//!
//! ## Pipeline
//!
//! ```text
//! ObservationMatrix
//!        ↓  psynet_core::correlation::correlation()
//! CorrelationMatrix (dense, symmetric)
//!        ↓  tmfg::build_tmfg()
//! Tmfg
//!   ├─ graph:      the filtered WeightedGraph
//!   └─ cliques / separators: construction record (junction tree)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, path lengths, planarity, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use psynet_core::config::TmfgConfig;
//! use psynet_network::graph::{GraphStats, Tmfg};
//!
//! let tmfg = Tmfg::from_observations(&observations, &TmfgConfig::default())?;
//! let stats = GraphStats::from_graph(tmfg.graph(), DistanceTransform::Inverse);
//! println!("edges={} planar={}", stats.edge_count, stats.is_maximal_planar);
//! ```
//!
//! [`WeightedGraph`]: psynet_core::model::WeightedGraph

pub mod seed;
pub mod stats;
pub mod tmfg;

pub use stats::GraphStats;
pub use tmfg::{MIN_NODES, Tmfg, build_tmfg, build_tmfg_from_values};
