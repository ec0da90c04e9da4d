//! Categorical encoders

use serde::Deserialize;

use crate::features::Cell;
use super::{check_width, ModelError, ModelResult};

/// Decodes class indices back into their original labels
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn inverse_transform(&self, index: usize) -> ModelResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnseenLabel(index))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    Ignore,
}

/// One-hot encoding with a fixed category list per input column
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotEncoder {
    pub categories: Vec<Vec<Cell>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    pub fn output_width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Encode one row; `columns` names the cells for error messages
    pub fn transform(&self, columns: &[String], cells: &[&Cell]) -> ModelResult<Vec<f64>> {
        check_width("OneHotEncoder", self.categories.len(), cells.len())?;

        let mut out = Vec::with_capacity(self.output_width());
        for ((categories, cell), column) in self.categories.iter().zip(cells).zip(columns) {
            let hit = categories.iter().position(|c| c.matches(cell));
            if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
                return Err(ModelError::UnknownCategory {
                    column: column.clone(),
                    value: cell.to_string(),
                });
            }
            out.extend((0..categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }

        Ok(out)
    }
}
