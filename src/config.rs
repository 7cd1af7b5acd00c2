use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Point caps per quality factor. The defaults sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactorWeights {
    pub profile: f64,
    pub stats: f64,
    pub integrations: f64,
    pub security: f64,
    pub performance: f64,
    pub achievements: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            profile: 20.0,
            stats: 20.0,
            integrations: 20.0,
            security: 20.0,
            performance: 10.0,
            achievements: 10.0,
        }
    }
}

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.profile
            + self.stats
            + self.integrations
            + self.security
            + self.performance
            + self.achievements
    }
}

/// Entry counts at which a count-based factor earns its full cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactorTargets {
    pub stats: usize,
    pub integrations: usize,
    pub performance_metrics: usize,
    pub achievements: usize,
}

impl Default for FactorTargets {
    fn default() -> Self {
        Self {
            stats: 6,
            integrations: 4,
            performance_metrics: 3,
            achievements: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationThresholds {
    pub min_quality_score: u32,
    pub min_completeness: u32,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_quality_score: 80,
            min_completeness: 90,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub weights: FactorWeights,
    pub targets: FactorTargets,
    pub thresholds: RecommendationThresholds,
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read scoring config: {}", path.display()))?;
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse scoring config: {}", path.display()))?;
        config
            .check()
            .with_context(|| format!("invalid scoring config: {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<()> {
        let weights = [
            ("profile", self.weights.profile),
            ("stats", self.weights.stats),
            ("integrations", self.weights.integrations),
            ("security", self.weights.security),
            ("performance", self.weights.performance),
            ("achievements", self.weights.achievements),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                bail!("weight for {name} must be a non-negative number, got {weight}");
            }
        }
        if self.weights.total() > 100.0 + f64::EPSILON {
            bail!(
                "factor weights sum to {}, which exceeds 100",
                self.weights.total()
            );
        }

        let targets = [
            ("stats", self.targets.stats),
            ("integrations", self.targets.integrations),
            ("performanceMetrics", self.targets.performance_metrics),
            ("achievements", self.targets.achievements),
        ];
        for (name, target) in targets {
            if target == 0 {
                bail!("target for {name} must be at least 1");
            }
        }

        Ok(())
    }
}
