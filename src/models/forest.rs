use crate::domain::ports::Regressor;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{self, Validate};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// A node in a regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Samples with `x[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf { value: f64 },
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        TreeNode::Leaf { value }
    }

    pub fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Leaf nodes have depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>) -> Result<f64> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = x.get(*feature).ok_or_else(|| {
                        PredictError::prediction(format!(
                            "tree splits on feature {feature}, but X has {} features",
                            x.len()
                        ))
                    })?;
                    node = if *value <= *threshold { left.as_ref() } else { right.as_ref() };
                }
            }
        }
    }

    fn check(&self, n_features: usize, path: &str) -> Result<()> {
        match self {
            TreeNode::Leaf { value } => validation::validate_finite(path, *value),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(PredictError::invalid_artifact(format!(
                        "{path} splits on feature {feature}, but the forest has {n_features} features"
                    )));
                }
                if threshold.is_nan() {
                    return Err(PredictError::invalid_artifact(format!(
                        "{path} has a NaN threshold"
                    )));
                }
                left.check(n_features, &format!("{path}.left"))?;
                right.check(n_features, &format!("{path}.right"))
            }
        }
    }
}

/// Random forest regressor restored from an artifact; predicts the mean of its trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_features: usize,
    trees: Vec<TreeNode>,
}

impl RandomForestRegressor {
    pub fn new(n_features: usize, trees: Vec<TreeNode>) -> Self {
        Self { n_features, trees }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

impl Validate for RandomForestRegressor {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("n_features", self.n_features, 1)?;
        if self.trees.is_empty() {
            return Err(PredictError::invalid_artifact(
                "random forest artifact has no trees",
            ));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features, &format!("trees[{index}]"))?;
        }
        Ok(())
    }
}

impl Regressor for RandomForestRegressor {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features {
            return Err(PredictError::prediction(format!(
                "X has {} features, but the random forest model is expecting {} features as input",
                x.ncols(),
                self.n_features
            )));
        }
        if self.trees.is_empty() {
            return Err(PredictError::prediction("random forest has no trees"));
        }
        validation::validate_finite_input(x)?;

        tracing::debug!(
            n_trees = self.trees.len(),
            max_depth = self.max_depth(),
            "running random forest prediction"
        );

        let n_trees = self.trees.len() as f64;
        x.axis_iter(Axis(0))
            .map(|row| {
                let total = self
                    .trees
                    .iter()
                    .map(|tree| tree.evaluate(row))
                    .sum::<Result<f64>>()?;
                Ok(total / n_trees)
            })
            .collect()
    }
}
