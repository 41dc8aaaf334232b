use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::DistanceTransform;

/// Tuning knobs for one pipeline run. Every field has a default, so an empty
/// TOML file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub tmfg: TmfgConfig,
    #[serde(default)]
    pub centrality: CentralityConfig,
    #[serde(default)]
    pub scores: ScoreConfig,
}

/// How the four-node TMFG seed is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Top four nodes by strength above the mean weight. O(n²).
    #[default]
    Greedy,
    /// Exhaustive search over all quartets. O(n⁴); bounded by
    /// [`TmfgConfig::exact_seed_limit`].
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmfgConfig {
    #[serde(default)]
    pub seed: SeedStrategy,
    /// Largest item count for which [`SeedStrategy::Exact`] is allowed.
    #[serde(default = "default_exact_seed_limit")]
    pub exact_seed_limit: usize,
}

impl Default for TmfgConfig {
    fn default() -> Self {
        Self {
            seed: SeedStrategy::default(),
            exact_seed_limit: default_exact_seed_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default)]
    pub distance: DistanceTransform,
    /// Inverse temperature for randomized-shortest-paths betweenness.
    #[serde(default = "default_rsp_beta")]
    pub rsp_beta: f64,
    /// Use weighted path lengths for community closeness.
    #[serde(default = "default_true")]
    pub weighted_closeness: bool,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            distance: DistanceTransform::default(),
            rsp_beta: default_rsp_beta(),
            weighted_closeness: default_true(),
        }
    }
}

/// Which within-community centrality weights an item's contribution to its
/// community score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemWeighting {
    /// Sum of absolute edge weights inside the community subgraph.
    #[default]
    Strength,
    /// Normalized shortest-path betweenness inside the community subgraph.
    Betweenness,
    /// Plain mean of the items.
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreConfig {
    #[serde(default)]
    pub item_weighting: ItemWeighting,
    /// Path lengths for [`ItemWeighting::Betweenness`].
    #[serde(default)]
    pub distance: DistanceTransform,
}

/// Load an [`AnalysisConfig`] from a TOML file. A missing file yields the
/// defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

const fn default_exact_seed_limit() -> usize {
    24
}

const fn default_rsp_beta() -> f64 {
    0.01
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = load_config(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(cfg, AnalysisConfig::default());
        assert_eq!(cfg.tmfg.seed, SeedStrategy::Greedy);
        assert_eq!(cfg.centrality.distance, DistanceTransform::Inverse);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("psynet.toml");
        std::fs::write(
            &path,
            "[tmfg]\nseed = \"exact\"\n\n[centrality]\ndistance = \"neg_log\"\nrsp_beta = 2.5\n",
        )
        .expect("write config");

        let cfg = load_config(&path).expect("parse");
        assert_eq!(cfg.tmfg.seed, SeedStrategy::Exact);
        assert_eq!(cfg.tmfg.exact_seed_limit, 24);
        assert_eq!(cfg.centrality.distance, DistanceTransform::NegLog);
        assert!((cfg.centrality.rsp_beta - 2.5).abs() < f64::EPSILON);
        assert!(cfg.centrality.weighted_closeness);
        assert_eq!(cfg.scores.item_weighting, ItemWeighting::Strength);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = AnalysisConfig::default();
        cfg.scores.item_weighting = ItemWeighting::Betweenness;
        let text = toml::to_string(&cfg).expect("serialize");
        let back: AnalysisConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[tmfg\nseed = 1").expect("write config");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
    }
}
