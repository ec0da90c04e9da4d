//! Estimator Module - exported model kernels
//!
//! Inference-only counterparts of the estimators produced by the training
//! side. Every type here deserializes from the JSON artifact format and
//! never fits anything.

pub mod column;
pub mod encoder;
pub mod kmeans;
pub mod linear;
pub mod preprocessor;
pub mod scaler;
pub mod tree;

pub use column::ColumnTransformer;
pub use encoder::{LabelEncoder, OneHotEncoder};
pub use kmeans::KMeans;
pub use linear::{ClassifierModel, RegressionModel};
pub use preprocessor::Preprocessor;
pub use scaler::{MinMaxScaler, StandardScaler};

use thiserror::Error;

/// Errors raised while evaluating an estimator
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{estimator} expected {expected} features, got {actual}")]
    ShapeMismatch {
        estimator: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("column '{0}' not found in input")]
    ColumnNotFound(String),

    #[error("column '{column}' expected a numeric value, got '{value}'")]
    NonNumeric { column: String, value: String },

    #[error("found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },

    #[error("y contains previously unseen label {0}")]
    UnseenLabel(usize),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("{0} has no fitted parameters")]
    Empty(&'static str),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Anything that maps a numeric row to another numeric row
pub trait Transform {
    fn transform(&self, row: &[f64]) -> ModelResult<Vec<f64>>;
}

/// Fail with `ShapeMismatch` unless `actual == expected`
pub(crate) fn check_width(estimator: &'static str, expected: usize, actual: usize) -> ModelResult<()> {
    if expected != actual {
        return Err(ModelError::ShapeMismatch { estimator, expected, actual });
    }
    Ok(())
}

/// Index of the largest value, first wins on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_check_width() {
        assert!(check_width("x", 3, 3).is_ok());
        let err = check_width("LinearRegression", 3, 2).unwrap_err();
        assert_eq!(err.to_string(), "LinearRegression expected 3 features, got 2");
    }
}
