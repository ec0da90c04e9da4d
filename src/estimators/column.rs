//! Column transformer
//!
//! Applies one fitted transformer per column group and concatenates the
//! outputs in step order, optionally followed by the unused columns.

use serde::Deserialize;

use crate::features::{Cell, FeatureFrame};
use super::{MinMaxScaler, ModelResult, OneHotEncoder, StandardScaler, Transform};

/// What happens to columns no step selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remainder {
    #[default]
    Drop,
    Passthrough,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepTransformer {
    StandardScaler(StandardScaler),
    MinMaxScaler(MinMaxScaler),
    OneHot(OneHotEncoder),
    Passthrough,
    Drop,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnStep {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub transformer: StepTransformer,
}

impl ColumnStep {
    fn numeric(&self, frame: &FeatureFrame) -> ModelResult<Vec<f64>> {
        self.columns
            .iter()
            .map(|c| frame.require(c)?.as_number(c))
            .collect()
    }

    fn apply(&self, frame: &FeatureFrame) -> ModelResult<Vec<f64>> {
        match &self.transformer {
            StepTransformer::StandardScaler(s) => s.transform(&self.numeric(frame)?),
            StepTransformer::MinMaxScaler(s) => s.transform(&self.numeric(frame)?),
            StepTransformer::OneHot(enc) => {
                let cells = self
                    .columns
                    .iter()
                    .map(|c| frame.require(c))
                    .collect::<ModelResult<Vec<&Cell>>>()?;
                enc.transform(&self.columns, &cells)
            }
            StepTransformer::Passthrough => self.numeric(frame),
            StepTransformer::Drop => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnTransformer {
    pub transformers: Vec<ColumnStep>,
    #[serde(default)]
    pub remainder: Remainder,
}

impl ColumnTransformer {
    pub fn transform(&self, frame: &FeatureFrame) -> ModelResult<Vec<f64>> {
        let mut out = Vec::new();
        for step in &self.transformers {
            let part = step.apply(frame)?;
            tracing::trace!("step '{}' produced {} features", step.name, part.len());
            out.extend(part);
        }

        if self.remainder == Remainder::Passthrough {
            for (name, cell) in frame.iter() {
                let used = self.transformers.iter().any(|s| s.columns.iter().any(|c| c == name));
                if !used {
                    out.push(cell.as_number(name)?);
                }
            }
        }

        Ok(out)
    }
}
