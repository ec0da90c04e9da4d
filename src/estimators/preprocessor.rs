//! FullPreprocessor wrapper
//!
//! The exported preprocessor artifact carries the wrapper's class name; a
//! document whose `class` differs is rejected at load time. Whether the wrapper
//! holds a fitted transformer is decided once, here, not on every request.

use serde::Deserialize;

use crate::features::FeatureFrame;
use super::{ColumnTransformer, ModelResult};

pub const WRAPPER_CLASS: &str = "FullPreprocessor";

/// On-disk shape of `preprocessor.json`
#[derive(Debug, Deserialize)]
pub struct PreprocessorArtifact {
    pub class: String,
    #[serde(default)]
    pub preprocessor: Option<ColumnTransformer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "PreprocessorArtifact")]
pub enum Preprocessor {
    Fitted(ColumnTransformer),
    /// No wrapped transformer: the row is handed on as numbers
    PassThrough,
}

impl TryFrom<PreprocessorArtifact> for Preprocessor {
    type Error = String;

    fn try_from(artifact: PreprocessorArtifact) -> Result<Self, Self::Error> {
        if artifact.class != WRAPPER_CLASS {
            return Err(format!(
                "artifact was saved as '{}', expected '{}'",
                artifact.class, WRAPPER_CLASS
            ));
        }
        Ok(match artifact.preprocessor {
            Some(inner) => Preprocessor::Fitted(inner),
            None => Preprocessor::PassThrough,
        })
    }
}

impl Preprocessor {
    pub fn transform(&self, frame: &FeatureFrame) -> ModelResult<Vec<f64>> {
        match self {
            Preprocessor::Fitted(inner) => inner.transform(frame),
            Preprocessor::PassThrough => frame
                .iter()
                .map(|(name, cell)| cell.as_number(name))
                .collect(),
        }
    }
}
