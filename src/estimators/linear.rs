//! Regression and classification models

use serde::Deserialize;

use super::tree::RandomForest;
use super::{argmax, check_width, ModelError, ModelResult};

fn dot(coef: &[f64], x: &[f64], intercept: f64) -> f64 {
    coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>() + intercept
}

/// Regression model artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear { coef: Vec<f64>, intercept: f64 },
    RandomForest(RandomForest),
}

impl RegressionModel {
    /// Predict one sample
    pub fn predict(&self, x: &[f64]) -> ModelResult<f64> {
        match self {
            Self::Linear { coef, intercept } => {
                check_width("LinearRegression", coef.len(), x.len())?;
                Ok(dot(coef, x, *intercept))
            }
            Self::RandomForest(forest) => forest.predict_value(x),
        }
    }
}

/// Classification model artifact; predictions are encoded class indices
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    /// One row per class, or a single row for a binary problem
    Logistic { coef: Vec<Vec<f64>>, intercept: Vec<f64> },
    RandomForest(RandomForest),
}

impl ClassifierModel {
    pub fn predict(&self, x: &[f64]) -> ModelResult<usize> {
        match self {
            Self::Logistic { coef, intercept } => {
                if coef.is_empty() {
                    return Err(ModelError::Empty("LogisticRegression"));
                }
                check_width("LogisticRegression", coef.len(), intercept.len())?;

                let mut scores = Vec::with_capacity(coef.len());
                for (row, b) in coef.iter().zip(intercept) {
                    check_width("LogisticRegression", row.len(), x.len())?;
                    scores.push(dot(row, x, *b));
                }

                if scores.len() == 1 {
                    return Ok(usize::from(scores[0] > 0.0));
                }
                argmax(&scores).ok_or(ModelError::Empty("LogisticRegression"))
            }
            Self::RandomForest(forest) => forest.predict_class(x),
        }
    }
}
