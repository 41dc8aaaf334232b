//! Centrality metrics for item networks.
//!
//! # Overview
//!
//! Each metric answers a different question about an item's place in the
//! network:
//!
//! - **Degree / strength** (`basic`): how many, and how strong, are the
//!   item's direct associations?
//! - **Betweenness** (`betweenness`): which items lie on the shortest paths
//!   between other items?
//! - **RSP betweenness** (`rsp`): the same question for walkers that mostly,
//!   but not only, follow shortest paths.
//! - **Closeness** (`closeness`): how near is the item to everything it can
//!   reach?
//!
//! # Path lengths
//!
//! Edge weights are similarities. Path-based metrics convert them to lengths
//! with a [`DistanceTransform`] (`1 / |w|` by default, see
//! [`paths`]). Unweighted graphs always use unit lengths.
//!
//! # Usage
//!
//! All metrics take a [`WeightedGraph`] reference and return a
//! [`CentralityVector`] indexed by item.
//!
//! ```rust,ignore
//! use psynet_core::model::DistanceTransform;
//! use psynet_network::metrics::{
//!     closeness, randomized_shortest_paths_betweenness, standard_betweenness,
//! };
//!
//! let graph = tmfg.graph();
//! let bc = standard_betweenness(graph, DistanceTransform::Inverse);
//! let rsp = randomized_shortest_paths_betweenness(graph, 0.01, DistanceTransform::Inverse)?;
//! let cc = closeness(graph, true, DistanceTransform::Inverse)?;
//! ```
//!
//! [`DistanceTransform`]: psynet_core::model::DistanceTransform
//! [`WeightedGraph`]: psynet_core::model::WeightedGraph
//! [`CentralityVector`]: psynet_core::model::CentralityVector

pub mod basic;
pub mod betweenness;
pub mod closeness;
pub mod paths;
pub mod rsp;

pub use basic::{degree, strength};
pub use betweenness::standard_betweenness;
pub use closeness::closeness;
pub use paths::shortest_path_lengths;
pub use rsp::randomized_shortest_paths_betweenness;
