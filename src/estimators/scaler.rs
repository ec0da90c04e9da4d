//! Feature scalers

use serde::Deserialize;

use super::{check_width, ModelResult, Transform};

/// Standardization: `(x - mean) / scale`
///
/// Either parameter may be absent when the scaler was fitted with
/// `with_mean=False` / `with_std=False`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl Transform for StandardScaler {
    fn transform(&self, row: &[f64]) -> ModelResult<Vec<f64>> {
        for params in [&self.mean, &self.scale].into_iter().flatten() {
            check_width("StandardScaler", params.len(), row.len())?;
        }

        let out = row
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => x,
                };
                match &self.scale {
                    // zero variance columns were fitted with scale 1
                    Some(scale) if scale[i] != 0.0 => centered / scale[i],
                    _ => centered,
                }
            })
            .collect();

        Ok(out)
    }
}

/// Min-max scaling in sklearn's stored form: `x * scale + min`
#[derive(Debug, Clone, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Transform for MinMaxScaler {
    fn transform(&self, row: &[f64]) -> ModelResult<Vec<f64>> {
        check_width("MinMaxScaler", self.min.len(), row.len())?;
        check_width("MinMaxScaler", self.scale.len(), row.len())?;

        Ok(row
            .iter()
            .zip(self.scale.iter().zip(&self.min))
            .map(|(x, (scale, min))| x * scale + min)
            .collect())
    }
}
