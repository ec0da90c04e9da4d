//! Artifacts Module - models loaded once at startup
//!
//! `ModelArtifacts` is built before the listener binds and shared read-only
//! with every handler through `AppState`. Each artifact, and each half of a
//! bundle, is optional; callers branch on presence explicitly.

pub mod loader;

use std::path::Path;

use serde::Deserialize;

use crate::estimators::{ClassifierModel, KMeans, LabelEncoder, Preprocessor, RegressionModel, StandardScaler};
pub use loader::{load_artifact, ArtifactStatus};

pub const PREPROCESSOR_FILE: &str = "preprocessor.json";
pub const REGRESSION_FILE: &str = "regression_model.json";
pub const CLASSIFIER_FILE: &str = "classifier_model.json";
pub const CLUSTER_FILE: &str = "cluster_model.json";

/// Classifier packaged with the label decoder it was trained against
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierBundle {
    pub model: Option<ClassifierModel>,
    pub le: Option<LabelEncoder>,
}

/// K-means packaged with the scaler for its two input features
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterBundle {
    pub scaler: Option<StandardScaler>,
    pub kmeans: Option<KMeans>,
}

#[derive(Debug, Default)]
pub struct ModelArtifacts {
    pub preprocessor: Option<Preprocessor>,
    pub regression: Option<RegressionModel>,
    pub classifier: Option<ClassifierModel>,
    pub label_encoder: Option<LabelEncoder>,
    pub cluster_scaler: Option<StandardScaler>,
    pub kmeans: Option<KMeans>,
    pub statuses: Vec<ArtifactStatus>,
}

impl ModelArtifacts {
    /// Load all four artifacts from `dir`. Missing or unreadable files are not fatal.
    pub fn load(dir: &Path) -> Self {
        tracing::info!("Loading model artifacts from {}", dir.display());

        let (preprocessor, pre_status) = load_artifact::<Preprocessor>("preprocessor", &dir.join(PREPROCESSOR_FILE));
        let (regression, reg_status) = load_artifact::<RegressionModel>("regression_model", &dir.join(REGRESSION_FILE));
        let (classifier_bundle, cls_status) = load_artifact::<ClassifierBundle>("classifier_model", &dir.join(CLASSIFIER_FILE));
        let (cluster_bundle, clu_status) = load_artifact::<ClusterBundle>("cluster_model", &dir.join(CLUSTER_FILE));

        let classifier_bundle = classifier_bundle.unwrap_or_default();
        let cluster_bundle = cluster_bundle.unwrap_or_default();

        let artifacts = Self {
            preprocessor,
            regression,
            classifier: classifier_bundle.model,
            label_encoder: classifier_bundle.le,
            cluster_scaler: cluster_bundle.scaler,
            kmeans: cluster_bundle.kmeans,
            statuses: vec![pre_status, reg_status, cls_status, clu_status],
        };
        artifacts.log_report();
        artifacts
    }

    /// Preprocessor and regression model are both required for a salary figure
    pub fn is_ready(&self) -> bool {
        self.preprocessor.is_some() && self.regression.is_some()
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some() && self.label_encoder.is_some()
    }

    pub fn has_cluster(&self) -> bool {
        self.cluster_scaler.is_some() && self.kmeans.is_some()
    }

    fn log_report(&self) {
        if self.is_ready() {
            tracing::info!("✅ Models loaded successfully!");
        } else {
            tracing::error!("❌ Model loading failed.");
        }
        for status in &self.statuses {
            tracing::debug!("{} loaded: {}", status.name, status.loaded);
        }
        tracing::debug!(
            "classifier_model: {}, le_cls: {} (salary range enabled: {})",
            self.classifier.is_some(),
            self.label_encoder.is_some(),
            self.has_classifier()
        );
        tracing::debug!(
            "cluster_scaler: {}, kmeans: {} (clustering enabled: {})",
            self.cluster_scaler.is_some(),
            self.kmeans.is_some(),
            self.has_cluster()
        );
    }
}
