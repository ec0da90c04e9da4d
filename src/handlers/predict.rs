//! Salary prediction handler

use axum::{extract::State, Json};

use crate::middleware::ValidatedJson;
use crate::models::{PredictionResponse, SalaryInput};
use crate::pipeline::predict_salary;
use crate::AppState;

/// `POST /predict/salary`
///
/// Pipeline failures still answer 200, with `{"error": ...}` as the body.
pub async fn salary(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SalaryInput>,
) -> Json<PredictionResponse> {
    match predict_salary(&state.artifacts, &input) {
        Ok(prediction) => Json(PredictionResponse::Success(prediction)),
        Err(e) => {
            tracing::error!(
                "❌ Error during prediction: {}\n{:?}\n{}",
                e,
                e.kind(),
                e.backtrace()
            );
            Json(PredictionResponse::Failure { error: e.to_string() })
        }
    }
}
