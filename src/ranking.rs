//! Ranking & response building
//!
//! Pure function of the classifier's probability list: the arg-max becomes
//! the recommendation, and the three most probable classes form the ranked
//! list. Ties are broken by the lower class code so output is deterministic.

use serde::Serialize;
use std::cmp::Ordering;

use crate::crops::crop_name;
use crate::error::{RecommendError, Result};

/// Number of entries in `top_recommendations`
pub const TOP_K: usize = 3;

/// Allowed drift of the probability sum from 1
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropConfidence {
    pub crop: &'static str,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub recommended_crop: &'static str,
    pub confidence: f64,
    pub top_recommendations: Vec<CropConfidence>,
}

/// Percentage rounded to two decimals.
///
/// Rounds the exact binary value of `probability * 100`, so a value stored
/// just below a `.xx5` boundary rounds down.
pub fn to_percentage(probability: f64) -> f64 {
    let percent = probability * 100.0;
    format!("{:.2}", percent).parse().unwrap_or(percent)
}

/// Rank `probabilities`, where position `i` belongs to class `classes[i]`.
pub fn rank(probabilities: &[f64], classes: &[u32]) -> Result<Recommendation> {
    validate_probabilities(probabilities, classes)?;

    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| classes[a].cmp(&classes[b]))
    });

    // Head of the ranked order is the arg-max under the same tie-break
    let best = order[0];

    let top_recommendations = order
        .iter()
        .take(TOP_K)
        .map(|&i| CropConfidence {
            crop: crop_name(classes[i]),
            confidence: to_percentage(probabilities[i]),
        })
        .collect();

    Ok(Recommendation {
        recommended_crop: crop_name(classes[best]),
        confidence: to_percentage(probabilities[best]),
        top_recommendations,
    })
}

fn validate_probabilities(probabilities: &[f64], classes: &[u32]) -> Result<()> {
    if probabilities.is_empty() {
        return Err(RecommendError::Computation("empty probability list".to_string()));
    }
    if probabilities.len() != classes.len() {
        return Err(RecommendError::Computation(format!(
            "got {} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }
    if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
        return Err(RecommendError::Computation(format!(
            "probability {} is outside [0, 1]",
            bad
        )));
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(RecommendError::Computation(format!(
            "probabilities sum to {}, expected 1",
            sum
        )));
    }
    Ok(())
}
