//! K-means cluster assignment

use serde::Deserialize;

use super::{check_width, ModelError, ModelResult};

#[derive(Debug, Clone, Deserialize)]
pub struct KMeans {
    pub cluster_centers: Vec<Vec<f64>>,
}

impl KMeans {
    /// Index of the nearest centroid (squared Euclidean, lowest index on ties)
    pub fn predict(&self, x: &[f64]) -> ModelResult<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (i, center) in self.cluster_centers.iter().enumerate() {
            check_width("KMeans", center.len(), x.len())?;
            let dist: f64 = center.iter().zip(x).map(|(c, v)| (c - v).powi(2)).sum();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }

        best.map(|(i, _)| i).ok_or(ModelError::Empty("KMeans"))
    }
}
