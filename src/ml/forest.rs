//! Random forest of axis-aligned decision trees.

use serde::{Deserialize, Serialize};

use super::{ChurnModel, PredictError, check_row_width};

/// One node of a flattened decision tree.
///
/// Child indices always point forward in the node array, so traversal from
/// the root terminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        /// Feature index tested at this node.
        feature: usize,
        /// Rows with `value <= threshold` go left.
        threshold: f64,
        left: usize,
        right: usize,
        /// Weighted impurity decrease contributed by this split.
        #[serde(default)]
        impurity_decrease: f64,
    },
    Leaf {
        /// Class distribution (counts or fractions) at the leaf.
        value: Vec<f64>,
    },
}

/// Flattened decision tree rooted at node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    impurity_decrease,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature} but the model has {n_features}"
                        ));
                    }
                    if !threshold.is_finite() || !impurity_decrease.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold or gain"));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {idx} has {} class values but the model has {n_classes}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(format!("leaf {idx} has a negative or non-finite value"));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("leaf {idx} has an empty class distribution"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `row`.
    fn leaf_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    return value.iter().map(|v| v / total).collect();
                }
            }
        }
    }

    /// Impurity decrease per feature, normalized to sum to one.
    fn importances(&self, n_features: usize) -> Vec<f64> {
        let mut out = vec![0.0; n_features];
        for node in &self.nodes {
            if let TreeNode::Split {
                feature,
                impurity_decrease,
                ..
            } = node
            {
                out[*feature] += impurity_decrease.max(0.0);
            }
        }
        normalize(&mut out);
        out
    }
}

/// Random forest classifier; probabilities average the per-tree leaf
/// distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestModel {
    /// Ordered class labels; index 1 is churn.
    pub classes: Vec<String>,
    /// Number of columns seen at training time.
    pub n_features: usize,
    pub trees: Vec<Tree>,
    /// Importances exported by the trainer. Derived from the trees when absent.
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl RandomForestModel {
    /// Validate structural invariants of the forest.
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("Model must define at least one class".to_string());
        }
        if self.n_features == 0 {
            return Err("Model must have at least one feature".to_string());
        }
        if self.trees.is_empty() {
            return Err("Random forest has no trees".to_string());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|err| format!("Tree {tree_idx}: {err}"))?;
        }
        if let Some(importances) = &self.feature_importances
            && importances.len() != self.n_features
        {
            return Err(format!(
                "feature_importances has {} values but the model has {} features",
                importances.len(),
                self.n_features
            ));
        }
        Ok(())
    }
}

impl ChurnModel for RandomForestModel {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        check_row_width(self.n_features, row)?;
        let mut sum = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.leaf_proba(row)) {
                *acc += p;
            }
        }
        let count = self.trees.len() as f64;
        Ok(sum.into_iter().map(|v| v / count).collect())
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        if let Some(explicit) = &self.feature_importances {
            return Some(explicit.clone());
        }
        let mut mean = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (acc, v) in mean.iter_mut().zip(tree.importances(self.n_features)) {
                *acc += v;
            }
        }
        normalize(&mut mean);
        Some(mean)
    }
}

fn normalize(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        for v in values.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, threshold: f64, left: usize, right: usize, gain: f64) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
            impurity_decrease: gain,
        }
    }

    fn leaf(no: f64, yes: f64) -> TreeNode {
        TreeNode::Leaf {
            value: vec![no, yes],
        }
    }

    /// Two stumps: one on feature 0 (tenure), one on feature 2.
    fn forest() -> RandomForestModel {
        RandomForestModel {
            classes: vec!["No".into(), "Yes".into()],
            n_features: 3,
            trees: vec![
                Tree {
                    nodes: vec![split(0, 10.0, 1, 2, 3.0), leaf(2.0, 8.0), leaf(9.0, 1.0)],
                },
                Tree {
                    nodes: vec![split(2, 0.5, 1, 2, 1.0), leaf(1.0, 1.0), leaf(3.0, 1.0)],
                },
            ],
            feature_importances: None,
        }
    }

    #[test]
    fn proba_averages_normalized_leaves() {
        let model = forest();
        let proba = model.predict_proba(&[5.0, 0.0, 0.0]).unwrap();
        assert!((proba[0] - 0.35).abs() < 1e-12);
        assert!((proba[1] - 0.65).abs() < 1e-12);

        let proba = model.predict_proba(&[10.5, 0.0, 1.0]).unwrap();
        assert!((proba[1] - (0.1 + 0.25) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_inclusive_on_left() {
        let model = forest();
        let at = model.predict_proba(&[10.0, 0.0, 0.0]).unwrap();
        let below = model.predict_proba(&[9.0, 0.0, 0.0]).unwrap();
        assert_eq!(at, below);
    }

    #[test]
    fn derived_importances_follow_impurity_decrease() {
        let importances = forest().feature_importances().unwrap();
        assert_eq!(importances.len(), 3);
        assert!((importances[0] - 0.5).abs() < 1e-12);
        assert_eq!(importances[1], 0.0);
        assert!((importances[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn explicit_importances_win() {
        let mut model = forest();
        model.feature_importances = Some(vec![0.2, 0.3, 0.5]);
        assert_eq!(model.feature_importances(), Some(vec![0.2, 0.3, 0.5]));
    }

    #[test]
    fn validate_rejects_backward_child() {
        let mut model = forest();
        model.trees[0].nodes[0] = split(0, 1.0, 0, 2, 0.0);
        assert!(model.validate().unwrap_err().contains("invalid child"));
    }

    #[test]
    fn validate_rejects_out_of_range_feature() {
        let mut model = forest();
        model.trees[1].nodes[0] = split(7, 1.0, 1, 2, 0.0);
        assert!(model.validate().unwrap_err().contains("feature 7"));
    }

    #[test]
    fn validate_rejects_importance_length_mismatch() {
        let mut model = forest();
        model.feature_importances = Some(vec![1.0]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn nodes_deserialize_untagged() {
        let json = r#"{"nodes": [
            {"feature": 0, "threshold": 1.5, "left": 1, "right": 2},
            {"value": [1, 0]},
            {"value": [0, 1]}
        ]}"#;
        let tree: Tree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.nodes[0], split(0, 1.5, 1, 2, 0.0));
        assert_eq!(tree.nodes[2], leaf(0.0, 1.0));
    }
}
