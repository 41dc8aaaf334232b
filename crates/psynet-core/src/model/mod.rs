//! Immutable value types exchanged between pipeline stages.
//!
//! ```text
//! ObservationMatrix ──correlation──▶ AssociationMatrix ──TMFG──▶ WeightedGraph
//!                                          │                         │
//!                                          └────────LoGo─────────────┴──▶ PrecisionMatrix
//! WeightedGraph + Partition ──▶ CentralityVector / community scores
//! ```
//!
//! Nothing here is mutated after construction; every stage takes references
//! and returns fresh values, so independent runs can proceed concurrently.

pub mod centrality;
pub mod graph;
pub mod matrix;
pub mod observation;
pub mod partition;
pub mod precision;

pub use centrality::CentralityVector;
pub use graph::{DistanceTransform, WeightedGraph};
pub use matrix::{AssociationKind, AssociationMatrix, CorrelationMatrix, CovarianceMatrix};
pub use observation::ObservationMatrix;
pub use partition::Partition;
pub use precision::PrecisionMatrix;
