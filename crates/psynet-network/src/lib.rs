#![forbid(unsafe_code)]
//! psynet-network library.
//!
//! Graph filtering, sparse precision estimation, centrality, and community
//! scoring for psychometric item networks.
//!
//! ```text
//! CorrelationMatrix ──graph::build_tmfg──▶ Tmfg ──topology::build_precision──▶ PrecisionMatrix
//!                                           │
//!                                           ├──metrics──▶ CentralityVector
//!                                           └──score────▶ community closeness / NetworkScores
//! ```
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns [`psynet_core::Result`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Parallelism**: `rayon` inside operations; results never depend on
//!   thread scheduling beyond floating-point summation order.

pub mod graph;
pub mod metrics;
pub mod score;
pub mod topology;

pub use graph::{GraphStats, Tmfg, build_tmfg};
pub use metrics::{closeness, randomized_shortest_paths_betweenness, standard_betweenness};
pub use score::{NetworkScores, aggregate_scores, community_closeness, score_agreement};
pub use topology::{JunctionTree, build_precision};
