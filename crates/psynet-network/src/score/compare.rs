//! Agreement between a network score and an externally fitted latent score.

use psynet_core::stats::{pearson, rmse, spearman, standardize};
use psynet_core::Result;
use serde::Serialize;

/// How closely two per-subject score vectors agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Agreement {
    pub pearson: f64,
    pub spearman: f64,
    /// RMSE after standardizing both vectors, so scale and location do not
    /// count as disagreement.
    pub rmse: f64,
}

/// Compare `scores` with `latent` subject by subject.
///
/// # Errors
///
/// Returns [`psynet_core::NetworkError::InvalidInput`] on a length mismatch,
/// fewer than two subjects, or a vector with zero variance.
pub fn score_agreement(scores: &[f64], latent: &[f64]) -> Result<Agreement> {
    let pearson = pearson(scores, latent)?;
    let spearman = spearman(scores, latent)?;
    let rmse = rmse(&standardize(scores)?, &standardize(latent)?)?;
    Ok(Agreement {
        pearson,
        spearman,
        rmse,
    })
}
