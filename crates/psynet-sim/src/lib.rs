#![forbid(unsafe_code)]
//! psynet-sim library.
//!
//! Deterministic synthetic data with a known community structure, and a
//! scenario runner that pushes it through the full psynet pipeline.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod scenario;

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use nalgebra::DMatrix;
use psynet_core::model::{CovarianceMatrix, ObservationMatrix, Partition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use scenario::{ScenarioReport, run_scenario};

/// Shape of a simple-structure factor design.
///
/// Every item belongs to exactly one community and loads `sqrt(ρ)` on that
/// community's latent factor, so in the population items of the same
/// community correlate at `within_correlation` and items of different
/// communities are uncorrelated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDesign {
    pub communities: usize,
    pub items_per_community: usize,
    /// Population correlation between two items of one community, in `[0, 1)`.
    pub within_correlation: f64,
    pub subjects: usize,
    pub seed: u64,
}

impl Default for SyntheticDesign {
    fn default() -> Self {
        Self {
            communities: 6,
            items_per_community: 8,
            within_correlation: 0.6,
            subjects: 500,
            seed: 42,
        }
    }
}

impl SyntheticDesign {
    #[must_use]
    pub const fn items(&self) -> usize {
        self.communities * self.items_per_community
    }

    /// Label of community `c`, zero-padded so labels sort numerically.
    #[must_use]
    pub fn label(&self, c: usize) -> String {
        let width = self.communities.to_string().len();
        format!("F{:0width$}", c + 1)
    }

    /// Validate the design before generating.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.communities == 0 {
            bail!("communities must be > 0");
        }
        if self.items_per_community == 0 {
            bail!("items_per_community must be > 0");
        }
        if self.subjects < 2 {
            bail!("subjects must be >= 2");
        }
        if !(0.0..1.0).contains(&self.within_correlation) {
            bail!(
                "within_correlation must be in [0, 1), got {}",
                self.within_correlation
            );
        }
        Ok(())
    }
}

/// One draw from a [`SyntheticDesign`].
#[derive(Debug, Clone)]
pub struct SyntheticData {
    pub observations: ObservationMatrix,
    /// True community of every item.
    pub partition: Partition,
    /// Population covariance of the items (unit variances).
    pub population: CovarianceMatrix,
    /// Realized latent factor per community label, one value per subject.
    pub latent: BTreeMap<String, Vec<f64>>,
}

/// Draw subjects from `design`.
///
/// Factors and items are drawn jointly: the `(C + n)`-dimensional
/// covariance of `[factors; items]` is Cholesky-factored once, and each
/// subject is `L z` for a standard normal `z` from a `StdRng` seeded with
/// `design.seed`. The same design always yields the same data.
///
/// # Errors
///
/// Returns an error if the design is invalid.
#[instrument(skip_all, fields(items = design.items(), subjects = design.subjects, seed = design.seed))]
pub fn generate(design: &SyntheticDesign) -> Result<SyntheticData> {
    design.validate()?;

    let c = design.communities;
    let n = design.items();
    let rho = design.within_correlation;
    let loading = rho.sqrt();
    let community_of = |item: usize| item / design.items_per_community;

    // Joint covariance of [factors (c); items (n)].
    let joint = DMatrix::from_fn(c + n, c + n, |a, b| match (a < c, b < c) {
        (true, true) => {
            if a == b { 1.0 } else { 0.0 }
        }
        (true, false) => {
            if community_of(b - c) == a { loading } else { 0.0 }
        }
        (false, true) => {
            if community_of(a - c) == b { loading } else { 0.0 }
        }
        (false, false) => {
            if a == b {
                1.0
            } else if community_of(a - c) == community_of(b - c) {
                rho
            } else {
                0.0
            }
        }
    });

    let factor = joint
        .clone()
        .cholesky()
        .context("joint factor/item covariance is not positive definite")?
        .l();

    let mut rng = StdRng::seed_from_u64(design.seed);
    let mut items = DMatrix::<f64>::zeros(design.subjects, n);
    let mut latent = vec![vec![0.0; design.subjects]; c];
    for s in 0..design.subjects {
        let z = nalgebra::DVector::from_fn(c + n, |_, _| rng.sample::<f64, _>(StandardNormal));
        let y = &factor * z;
        for (f, values) in latent.iter_mut().enumerate() {
            values[s] = y[f];
        }
        for i in 0..n {
            items[(s, i)] = y[c + i];
        }
    }

    let population = CovarianceMatrix::covariance(joint.view((c, c), (n, n)).into_owned())?;
    let partition = Partition::new((0..n).map(|i| design.label(community_of(i))))?;
    let latent = latent
        .into_iter()
        .enumerate()
        .map(|(f, values)| (design.label(f), values))
        .collect();

    debug!("synthetic data drawn");
    Ok(SyntheticData {
        observations: ObservationMatrix::from_matrix(items)?,
        partition,
        population,
        latent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use psynet_core::correlation::correlation;

    fn small() -> SyntheticDesign {
        SyntheticDesign {
            communities: 3,
            items_per_community: 4,
            within_correlation: 0.5,
            subjects: 2000,
            seed: 7,
        }
    }

    #[test]
    fn default_design_is_six_by_eight() {
        let d = SyntheticDesign::default();
        assert_eq!(d.items(), 48);
        assert_eq!(d.label(0), "F1");
        assert!(d.validate().is_ok());
    }

    #[test]
    fn labels_sort_numerically() {
        let d = SyntheticDesign {
            communities: 12,
            ..SyntheticDesign::default()
        };
        assert_eq!(d.label(0), "F01");
        assert_eq!(d.label(11), "F12");
    }

    #[test]
    fn invalid_designs_are_rejected() {
        for bad in [
            SyntheticDesign {
                communities: 0,
                ..small()
            },
            SyntheticDesign {
                subjects: 1,
                ..small()
            },
            SyntheticDesign {
                within_correlation: 1.0,
                ..small()
            },
        ] {
            assert!(generate(&bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate(&small()).expect("valid");
        let b = generate(&small()).expect("valid");
        assert_eq!(a.observations, b.observations);
        assert_eq!(a.latent, b.latent);

        let other = generate(&SyntheticDesign { seed: 8, ..small() }).expect("valid");
        assert_ne!(a.observations, other.observations);
    }

    #[test]
    fn sample_correlation_matches_population_blocks() {
        let data = generate(&small()).expect("valid");
        let r = correlation(&data.observations).expect("non-degenerate");
        assert!((r.get(0, 1) - 0.5).abs() < 0.08);
        assert!(r.get(0, 4).abs() < 0.08);
        assert_eq!(data.population.get(0, 1), 0.5);
        assert_eq!(data.population.get(0, 4), 0.0);
        assert_eq!(data.partition.community_count(), 3);
    }

    #[test]
    fn latent_factor_drives_its_items() {
        let data = generate(&small()).expect("valid");
        let f1 = &data.latent["F1"];
        let item0 = data.observations.item_column(0);
        let item8 = data.observations.item_column(8);
        let r_own = psynet_core::stats::pearson(f1, &item0).expect("same length");
        let r_other = psynet_core::stats::pearson(f1, &item8).expect("same length");
        // Loading sqrt(0.5) ≈ 0.707.
        assert!((r_own - 0.5_f64.sqrt()).abs() < 0.08);
        assert!(r_other.abs() < 0.08);
    }
}
