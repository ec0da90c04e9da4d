//! Prediction response model

use serde::{Deserialize, Serialize};

/// Successful output of the prediction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPrediction {
    pub predicted_salary: f64,
    pub salary_range: String,
    pub cluster_description: String,
}

/// Body of `POST /predict/salary`; always sent with status 200
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Success(SalaryPrediction),
    Failure { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let body = PredictionResponse::Success(SalaryPrediction {
            predicted_salary: 6940.0,
            salary_range: "High".to_string(),
            cluster_description: "Unknown".to_string(),
        });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "predicted_salary": 6940.0,
                "salary_range": "High",
                "cluster_description": "Unknown"
            })
        );
    }

    #[test]
    fn test_failure_shape() {
        let body = PredictionResponse::Failure { error: "boom".to_string() };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({ "error": "boom" }));
    }
}
