//! Crop classifier
//!
//! The recommender only needs two capabilities from a model: class
//! probabilities for a scaled feature vector, and the class code each
//! probability position stands for. [`Classifier`] is that seam;
//! [`ForestClassifier`] is the tree ensemble shipped as `model.json`.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "classes": [1, 2, ..., 22],
//!   "n_features": 8,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 6, "threshold": -0.41, "left": 1, "right": 2 },
//!         { "value": [0.0, 3.0, ...] },
//!         { "value": [5.0, 0.0, ...] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Split nodes send `x[feature] <= threshold` left, with `x[feature]` first
//! narrowed to `f32` the way the trees were fitted. Leaf `value`s are
//! per-class weights (sample counts or fractions) in `classes` order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

use crate::error::RecommendError;
use crate::features::N_FEATURES;

pub trait Classifier: Send + Sync {
    /// Class code for each probability position
    fn classes(&self) -> &[u32];

    fn predict_probabilities(&self, features: &[f64]) -> Result<Vec<f64>, RecommendError>;

    /// Class with the highest probability; ties go to the earliest position.
    fn predict(&self, features: &[f64]) -> Result<u32, RecommendError> {
        let probabilities = self.predict_probabilities(features)?;
        let best = argmax(&probabilities).ok_or_else(|| {
            RecommendError::Computation("classifier returned no probabilities".to_string())
        })?;
        self.classes().get(best).copied().ok_or_else(|| {
            RecommendError::Computation(format!("no class code for probability position {}", best))
        })
    }
}

/// First index of the maximum value
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

// ============================================================================
// Artifact (serde) types
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForestArtifact {
    pub classes: Vec<u32>,
    #[serde(default = "default_n_features")]
    pub n_features: usize,
    pub trees: Vec<TreeArtifact>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

fn default_n_features() -> usize {
    N_FEATURES
}

// ============================================================================
// Validated forest
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Normalized to sum to 1
    Leaf(Vec<f64>),
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Children always sit after their parent, so the walk terminates.
    fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    let value = f64::from(features[*feature] as f32);
                    idx = if value <= *threshold { *left } else { *right };
                }
                Node::Leaf(probabilities) => return probabilities,
            }
        }
    }
}

/// Averaged-probability tree ensemble
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    classes: Vec<u32>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier: {:?}", path))?;

        let artifact: ForestArtifact = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse classifier JSON")?;

        Self::from_artifact(artifact)
    }

    /// Validate structure and normalize leaves.
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self> {
        let n_classes = artifact.classes.len();
        if n_classes == 0 {
            anyhow::bail!("Classifier declares no classes");
        }
        let mut seen = artifact.classes.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != n_classes {
            anyhow::bail!("Classifier class list contains duplicates: {:?}", artifact.classes);
        }
        if artifact.n_features != N_FEATURES {
            anyhow::bail!(
                "Classifier was fitted on {} features, expected {}",
                artifact.n_features,
                N_FEATURES
            );
        }
        if artifact.trees.is_empty() {
            anyhow::bail!("Classifier has no trees");
        }

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(t, tree)| {
                build_tree(tree, n_classes, artifact.n_features)
                    .with_context(|| format!("Invalid tree {}", t))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            classes: artifact.classes,
            n_features: artifact.n_features,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

fn build_tree(tree: TreeArtifact, n_classes: usize, n_features: usize) -> Result<DecisionTree> {
    let n_nodes = tree.nodes.len();
    if n_nodes == 0 {
        anyhow::bail!("tree has no nodes");
    }

    let nodes = tree
        .nodes
        .into_iter()
        .enumerate()
        .map(|(idx, node)| match node {
            NodeArtifact::Split { feature, threshold, left, right } => {
                if feature >= n_features {
                    anyhow::bail!("node {} splits on feature {} (only {} features)", idx, feature, n_features);
                }
                if !threshold.is_finite() {
                    anyhow::bail!("node {} has a non-finite threshold", idx);
                }
                for child in [left, right] {
                    if child <= idx || child >= n_nodes {
                        anyhow::bail!("node {} has invalid child index {}", idx, child);
                    }
                }
                Ok(Node::Split { feature, threshold, left, right })
            }
            NodeArtifact::Leaf { value } => {
                if value.len() != n_classes {
                    anyhow::bail!("leaf {} has {} weights, expected {}", idx, value.len(), n_classes);
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    anyhow::bail!("leaf {} has negative or non-finite weights", idx);
                }
                let total: f64 = value.iter().sum();
                if total <= 0.0 {
                    anyhow::bail!("leaf {} has zero total weight", idx);
                }
                Ok(Node::Leaf(value.iter().map(|w| w / total).collect()))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DecisionTree { nodes })
}

impl Classifier for ForestClassifier {
    fn classes(&self) -> &[u32] {
        &self.classes
    }

    fn predict_probabilities(&self, features: &[f64]) -> Result<Vec<f64>, RecommendError> {
        if features.len() != self.n_features {
            return Err(RecommendError::Computation(format!(
                "classifier expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.leaf_for(features)) {
                *total += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(totals.into_iter().map(|t| t / n_trees).collect())
    }
}
