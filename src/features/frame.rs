//! Single-row feature frame

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::estimators::{ModelError, ModelResult};

/// One value of a feature frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Numeric view of the cell; text is accepted only if it parses as a float
    pub fn as_number(&self, column: &str) -> ModelResult<f64> {
        match self {
            Cell::Number(v) => Ok(*v),
            Cell::Text(s) => s.trim().parse().map_err(|_| ModelError::NonNumeric {
                column: column.to_string(),
                value: s.clone(),
            }),
        }
    }

    /// Category equality: numbers against numbers, text against text
    pub fn matches(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Ordered named cells, the Rust stand-in for a one-row table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<(String, Cell)>,
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing any existing column of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Cell>) {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.insert(name, value);
        self
    }

    /// Rename a column without moving it
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| n == from) {
            slot.0 = to.to_string();
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn require(&self, name: &str) -> ModelResult<&Cell> {
        self.get(name).ok_or_else(|| ModelError::ColumnNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }
}

impl fmt::Display for FeatureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, cell) in &self.columns {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", name, cell)?;
        }
        Ok(())
    }
}
