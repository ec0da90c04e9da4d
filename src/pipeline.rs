//! Prediction Pipeline
//!
//! normalize -> preprocess -> regression -> classification -> clustering.
//! The regression output doubles as the income feature of the cluster model.

use std::backtrace::Backtrace;
use std::fmt;

use thiserror::Error;

use crate::artifacts::ModelArtifacts;
use crate::estimators::{ModelError, Preprocessor, Transform};
use crate::features::normalize;
use crate::models::{SalaryInput, SalaryPrediction};

/// Undoes the target scaling applied at training time
pub const SALARY_SCALE: f64 = 200.0;

pub const UNKNOWN: &str = "Unknown";
pub const UNCATEGORIZED: &str = "Uncategorized";

const CLUSTER_DESCRIPTIONS: [&str; 3] = [
    "Young, Mid-level, High Growth Potential",
    "Experienced, Senior-level, Stable Performer",
    "New Entrants, Low Experience, High Learning Opportunity",
];

#[derive(Debug, Error)]
pub enum PipelineErrorKind {
    #[error("{0} is not loaded")]
    MissingArtifact(&'static str),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Pipeline failure with the stack captured where it was raised.
/// Capture is forced, independent of `RUST_BACKTRACE`.
#[derive(Debug)]
pub struct PipelineError {
    kind: PipelineErrorKind,
    backtrace: Backtrace,
}

impl PipelineError {
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<PipelineErrorKind> for PipelineError {
    fn from(kind: PipelineErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::force_capture(),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(e: ModelError) -> Self {
        PipelineErrorKind::Model(e).into()
    }
}

pub fn cluster_description(cluster: usize) -> &'static str {
    CLUSTER_DESCRIPTIONS.get(cluster).copied().unwrap_or(UNCATEGORIZED)
}

/// Round half away from zero to two decimals
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn scale_salary(raw: f64) -> f64 {
    round2(raw * SALARY_SCALE)
}

/// Run every model against one record
pub fn predict_salary(artifacts: &ModelArtifacts, input: &SalaryInput) -> Result<SalaryPrediction, PipelineError> {
    tracing::debug!("Incoming record: {:?}", input);
    let frame = normalize(input);
    tracing::debug!("Processed frame: {}", frame);

    let features = artifacts
        .preprocessor
        .as_ref()
        .unwrap_or(&Preprocessor::PassThrough)
        .transform(&frame)?;

    let regression = artifacts
        .regression
        .as_ref()
        .ok_or(PipelineErrorKind::MissingArtifact("regression model"))?;
    let predicted_salary = scale_salary(regression.predict(&features)?);

    let salary_range = match (&artifacts.classifier, &artifacts.label_encoder) {
        (Some(model), Some(le)) => {
            let class = model.predict(&features)?;
            le.inverse_transform(class)?.to_string()
        }
        _ => UNKNOWN.to_string(),
    };

    let cluster_description = match (&artifacts.cluster_scaler, &artifacts.kmeans) {
        (Some(scaler), Some(kmeans)) => {
            // TotalWorkingYears, MonthlyIncome
            let cluster_input = [input.total_working_years, predicted_salary];
            tracing::debug!("Cluster input features: {:?}", cluster_input);

            let scaled = scaler.transform(&cluster_input)?;
            let label = kmeans.predict(&scaled)?;
            tracing::debug!("Cluster label: {}", label);

            cluster_description(label).to_string()
        }
        _ => UNKNOWN.to_string(),
    };

    Ok(SalaryPrediction {
        predicted_salary,
        salary_range,
        cluster_description,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::backtrace::BacktraceStatus;

    use crate::estimators::RegressionModel;
    use crate::models::salary::sample_input;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_full_prediction() {
        let result = predict_salary(&fixtures::full(), &sample_input()).unwrap();

        assert_close(result.predicted_salary, 6940.0);
        assert_eq!(result.salary_range, ">=5k");
        // scaled [8, 6940] -> [-0.4, 1.94], nearest center is [1, 2]
        assert_eq!(result.cluster_description, "Experienced, Senior-level, Stable Performer");
    }

    #[test]
    fn test_scale_salary() {
        assert_close(scale_salary(34.7), 6940.0);
        assert_close(scale_salary(12.345678), 2469.14);
        assert_close(scale_salary(-0.01234), -2.47);
        assert_close(scale_salary(0.0), 0.0);
    }

    #[test]
    fn test_regression_output_scaled() {
        let mut artifacts = fixtures::full();
        artifacts.preprocessor = Some(Preprocessor::PassThrough);
        artifacts.regression = Some(RegressionModel::Linear {
            coef: vec![0.0; 15],
            intercept: 21.123456,
        });
        artifacts.classifier = None;
        artifacts.cluster_scaler = None;

        let mut input = sample_input();
        input.gender = "0".to_string();
        input.field = "0".to_string();
        input.department = "0".to_string();
        input.job_role = "0".to_string();

        let result = predict_salary(&artifacts, &input).unwrap();
        assert_close(result.predicted_salary, 4224.69);
    }

    #[test]
    fn test_missing_classifier_parts() {
        let mut artifacts = fixtures::full();
        artifacts.label_encoder = None;
        assert_eq!(predict_salary(&artifacts, &sample_input()).unwrap().salary_range, UNKNOWN);

        let mut artifacts = fixtures::full();
        artifacts.classifier = None;
        assert_eq!(predict_salary(&artifacts, &sample_input()).unwrap().salary_range, UNKNOWN);
    }

    #[test]
    fn test_missing_cluster_parts() {
        let mut artifacts = fixtures::full();
        artifacts.kmeans = None;
        assert_eq!(predict_salary(&artifacts, &sample_input()).unwrap().cluster_description, UNKNOWN);

        let mut artifacts = fixtures::full();
        artifacts.cluster_scaler = None;
        assert_eq!(predict_salary(&artifacts, &sample_input()).unwrap().cluster_description, UNKNOWN);
    }

    #[test]
    fn test_cluster_table() {
        assert_eq!(cluster_description(0), "Young, Mid-level, High Growth Potential");
        assert_eq!(cluster_description(1), "Experienced, Senior-level, Stable Performer");
        assert_eq!(cluster_description(2), "New Entrants, Low Experience, High Learning Opportunity");
        assert_eq!(cluster_description(3), UNCATEGORIZED);
        assert_eq!(cluster_description(42), UNCATEGORIZED);
    }

    #[test]
    fn test_fourth_cluster_is_uncategorized() {
        let mut artifacts = fixtures::full();
        let (scaler, kmeans) = fixtures::cluster(vec![
            vec![0.0, 0.0],
            vec![5.0, 5.0],
            vec![-5.0, -5.0],
            vec![-0.4, 1.94],
        ]);
        artifacts.cluster_scaler = Some(scaler);
        artifacts.kmeans = Some(kmeans);

        let result = predict_salary(&artifacts, &sample_input()).unwrap();
        assert_eq!(result.cluster_description, UNCATEGORIZED);
    }

    #[test]
    fn test_model_failure_is_error() {
        let mut artifacts = fixtures::full();
        artifacts.regression = Some(RegressionModel::Linear {
            coef: vec![1.0, 2.0],
            intercept: 0.0,
        });

        let err = predict_salary(&artifacts, &sample_input()).unwrap_err();
        assert!(matches!(err.kind(), PipelineErrorKind::Model(ModelError::ShapeMismatch { .. })));
        assert_eq!(err.to_string(), "LinearRegression expected 2 features, got 5");
    }

    #[test]
    fn test_error_carries_stack() {
        let mut artifacts = fixtures::full();
        artifacts.regression = Some(RegressionModel::Linear {
            coef: vec![1.0, 2.0],
            intercept: 0.0,
        });

        let err = predict_salary(&artifacts, &sample_input()).unwrap_err();
        assert_eq!(err.backtrace().status(), BacktraceStatus::Captured);

        artifacts.regression = None;
        let err = predict_salary(&artifacts, &sample_input()).unwrap_err();
        assert!(matches!(err.kind(), PipelineErrorKind::MissingArtifact(_)));
        assert_eq!(err.backtrace().status(), BacktraceStatus::Captured);
    }

    #[test]
    fn test_missing_regression_is_error() {
        let mut artifacts = fixtures::full();
        artifacts.regression = None;
        let err = predict_salary(&artifacts, &sample_input()).unwrap_err();
        assert_eq!(err.to_string(), "regression model is not loaded");
    }

    #[test]
    fn test_unknown_education_reaches_preprocessor() {
        let mut input = sample_input();
        input.education = "PhD".to_string();
        let err = predict_salary(&fixtures::full(), &input).unwrap_err();
        assert!(matches!(err.kind(), PipelineErrorKind::Model(ModelError::NonNumeric { .. })));
    }

    #[test]
    fn test_missing_preprocessor_passes_through() {
        let mut artifacts = fixtures::full();
        artifacts.preprocessor = None;
        // text columns cannot pass through untransformed
        let err = predict_salary(&artifacts, &sample_input()).unwrap_err();
        assert!(matches!(err.kind(), PipelineErrorKind::Model(ModelError::NonNumeric { .. })));
    }
}
