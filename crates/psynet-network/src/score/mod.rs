//! Community-level summaries of an item network.
//!
//! - [`community_closeness`]: how central each community is in the full
//!   network.
//! - [`aggregate_scores`]: per-subject community scores weighted by item
//!   centrality, plus an overall score weighted by community strength.
//! - [`score_agreement`]: comparison of a score vector with an externally
//!   fitted latent-variable vector.

pub mod aggregate;
pub mod community;
pub mod compare;

pub use aggregate::{NetworkScores, aggregate_scores};
pub use community::community_closeness;
pub use compare::{Agreement, score_agreement};
