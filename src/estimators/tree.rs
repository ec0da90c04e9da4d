//! Decision trees in sklearn's flat array layout
//!
//! Node `i` is a leaf when `children_left[i] == -1`. Internal nodes send a
//! sample left when `x[feature[i]] <= threshold[i]`.

use serde::Deserialize;

use super::{argmax, check_width, ModelError, ModelResult};

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node output: a single value for regressors, class counts for classifiers
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn child(&self, index: i64) -> ModelResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.node_count())
            .ok_or_else(|| ModelError::MalformedTree(format!("child index {} out of range", index)))
    }

    /// Walk the tree and return the leaf's output
    pub fn leaf_value(&self, x: &[f64]) -> ModelResult<&[f64]> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::Empty("DecisionTree"));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ModelError::MalformedTree("node arrays differ in length".to_string()));
        }

        let mut node = 0usize;
        // a well-formed tree reaches a leaf in fewer than n steps
        for _ in 0..n {
            if self.children_left[node] == LEAF {
                return Ok(&self.value[node]);
            }

            let feature = usize::try_from(self.feature[node])
                .map_err(|_| ModelError::MalformedTree(format!("node {} has no split feature", node)))?;
            let sample = *x.get(feature).ok_or(ModelError::ShapeMismatch {
                estimator: "DecisionTree",
                expected: feature + 1,
                actual: x.len(),
            })?;

            node = if sample <= self.threshold[node] {
                self.child(self.children_left[node])?
            } else {
                self.child(self.children_right[node])?
            };
        }

        Err(ModelError::MalformedTree("traversal did not reach a leaf".to_string()))
    }
}

/// Bagged trees: regression averages leaf values, classification averages
/// normalized leaf class distributions
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    #[serde(default)]
    pub n_features: Option<usize>,
}

impl RandomForest {
    fn check(&self, x: &[f64]) -> ModelResult<()> {
        if self.trees.is_empty() {
            return Err(ModelError::Empty("RandomForest"));
        }
        if let Some(n) = self.n_features {
            check_width("RandomForest", n, x.len())?;
        }
        Ok(())
    }

    pub fn predict_value(&self, x: &[f64]) -> ModelResult<f64> {
        self.check(x)?;

        let mut sum = 0.0;
        for tree in &self.trees {
            let leaf = tree.leaf_value(x)?;
            sum += leaf.first().copied().ok_or(ModelError::MalformedTree("empty leaf value".to_string()))?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    pub fn predict_proba(&self, x: &[f64]) -> ModelResult<Vec<f64>> {
        self.check(x)?;

        let mut proba: Vec<f64> = Vec::new();
        for tree in &self.trees {
            let leaf = tree.leaf_value(x)?;
            if proba.is_empty() {
                proba = vec![0.0; leaf.len()];
            } else if proba.len() != leaf.len() {
                return Err(ModelError::MalformedTree("trees disagree on class count".to_string()));
            }

            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (p, count) in proba.iter_mut().zip(leaf) {
                    *p += count / total;
                }
            }
        }

        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    pub fn predict_class(&self, x: &[f64]) -> ModelResult<usize> {
        let proba = self.predict_proba(x)?;
        argmax(&proba).ok_or(ModelError::Empty("RandomForest"))
    }
}
