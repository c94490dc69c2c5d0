//! Scaling pipeline
//!
//! Two fitted linear transforms applied in a fixed order: min-max
//! normalization, then standardization. The classifier was trained on
//! features that went through exactly this sequence.
//!
//! Parameters are loaded from JSON artifacts exported after fitting. Keys
//! may use either plain names (`data_min`) or the fitted-attribute names
//! with a trailing underscore (`data_min_`).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

use crate::error::RecommendError;
use crate::features::N_FEATURES;

fn default_feature_range() -> [f64; 2] {
    [0.0, 1.0]
}

/// Per-feature min-max normalization
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinMaxScaler {
    #[serde(alias = "data_min_")]
    pub data_min: Vec<f64>,
    #[serde(alias = "data_max_")]
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: [f64; 2],
}

/// Per-feature standardization
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandardScaler {
    #[serde(alias = "mean_")]
    pub mean: Vec<f64>,
    /// Standard deviations
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read min-max scaler: {:?}", path))?;

        let scaler: MinMaxScaler = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse min-max scaler JSON")?;

        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<()> {
        check_params("data_min", &self.data_min, N_FEATURES)?;
        check_params("data_max", &self.data_max, N_FEATURES)?;
        check_params("feature_range", &self.feature_range, 2)?;
        if self.feature_range[0] >= self.feature_range[1] {
            anyhow::bail!(
                "Min-max feature_range must be increasing, got {:?}",
                self.feature_range
            );
        }
        Ok(())
    }

    /// `lo + (x - min) / (max - min) * (hi - lo)`; a constant feature divides by 1.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, RecommendError> {
        check_dimension("min-max scaler", self.data_min.len(), x.len())?;
        let [lo, hi] = self.feature_range;

        Ok(x.iter()
            .zip(self.data_min.iter().zip(&self.data_max))
            .map(|(&value, (&min, &max))| {
                lo + (value - min) / nonzero(max - min) * (hi - lo)
            })
            .collect())
    }
}

impl StandardScaler {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read standard scaler: {:?}", path))?;

        let scaler: StandardScaler = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse standard scaler JSON")?;

        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<()> {
        check_params("mean", &self.mean, N_FEATURES)?;
        check_params("scale", &self.scale, N_FEATURES)?;
        if let Some(negative) = self.scale.iter().find(|s| **s < 0.0) {
            anyhow::bail!("Standard scaler has a negative deviation: {}", negative);
        }
        Ok(())
    }

    /// `(x - mean) / std`; a zero deviation divides by 1.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, RecommendError> {
        check_dimension("standard scaler", self.mean.len(), x.len())?;

        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&value, (&mean, &std))| (value - mean) / nonzero(std))
            .collect())
    }
}

/// Min-max followed by standardization
#[derive(Debug, Clone)]
pub struct ScalingPipeline {
    pub min_max: MinMaxScaler,
    pub standard: StandardScaler,
}

impl ScalingPipeline {
    pub fn new(min_max: MinMaxScaler, standard: StandardScaler) -> Self {
        Self { min_max, standard }
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, RecommendError> {
        let normalized = self.min_max.transform(x)?;
        self.standard.transform(&normalized)
    }
}

fn nonzero(d: f64) -> f64 {
    if d == 0.0 { 1.0 } else { d }
}

fn check_params(name: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        anyhow::bail!("Scaler parameter '{}' has {} values, expected {}", name, values.len(), expected);
    }
    if values.iter().any(|v| !v.is_finite()) {
        anyhow::bail!("Scaler parameter '{}' contains non-finite values", name);
    }
    Ok(())
}

fn check_dimension(stage: &str, expected: usize, got: usize) -> Result<(), RecommendError> {
    if expected != got {
        return Err(RecommendError::Computation(format!(
            "{} expects {} features, got {}",
            stage, expected, got
        )));
    }
    Ok(())
}
