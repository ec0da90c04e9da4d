//! Router-level tests
//!
//! Drive the full axum stack (extractors, CORS, handlers) with in-memory
//! artifacts.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::artifacts::ModelArtifacts;
use crate::estimators::RegressionModel;
use crate::pipeline::fixtures;
use crate::{create_router, AppState};

fn app(artifacts: ModelArtifacts) -> Router {
    create_router(AppState {
        artifacts: Arc::new(artifacts),
    })
}

fn example_body() -> Value {
    json!({
        "Age": 30,
        "Gender": "Male",
        "Education": "Bachelor",
        "Field": "Life Sciences",
        "Department": "R&D",
        "JobRole": "Research Scientist",
        "JobLevel": 2,
        "YearsAtCompany": 5,
        "TotalWorkingYears": 8,
        "YearsInCurrentRole": 3,
        "YearsSinceLastPromotion": 1,
        "YearsWithCurrManager": 3,
        "DistanceFromHome": 10,
        "PercentSalaryHike": 12,
        "PerformanceRating": 3
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_home() {
    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(ModelArtifacts::default()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "✅ Salary Prediction API is running!" }));
}

#[tokio::test]
async fn test_health_reports_degraded_without_models() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(ModelArtifacts::default()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["artifacts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_reports_healthy_with_models() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (_, body) = send(app(fixtures::full()), req).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_predict_full_example() {
    let (status, body) = send(app(fixtures::full()), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    let obj = body.as_object().unwrap();
    assert!(!obj.contains_key("error"));
    assert_eq!(obj.len(), 3);
    assert!((body["predicted_salary"].as_f64().unwrap() - 6940.0).abs() < 1e-9);
    assert_eq!(body["salary_range"], ">=5k");
    assert_eq!(body["cluster_description"], "Experienced, Senior-level, Stable Performer");
}

#[tokio::test]
async fn test_predict_without_optional_bundles() {
    let mut artifacts = fixtures::full();
    artifacts.classifier = None;
    artifacts.kmeans = None;

    let (status, body) = send(app(artifacts), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["salary_range"], "Unknown");
    assert_eq!(body["cluster_description"], "Unknown");
}

#[tokio::test]
async fn test_model_failure_returns_error_payload() {
    let mut artifacts = fixtures::full();
    artifacts.regression = Some(RegressionModel::Linear {
        coef: vec![1.0],
        intercept: 0.0,
    });

    let (status, body) = send(app(artifacts), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "LinearRegression expected 1 features, got 5" }));
}

#[tokio::test]
async fn test_no_models_returns_error_payload() {
    let (status, body) = send(app(ModelArtifacts::default()), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].is_string());
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let mut body = example_body();
    body.as_object_mut().unwrap().remove("YearsAtCompany");

    // with no models loaded the pipeline would answer 200, so a 422 proves it never ran
    let (status, body) = send(app(ModelArtifacts::default()), post_json("/predict/salary", &body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("YearsAtCompany"));
}

#[tokio::test]
async fn test_numeric_strings_match_numeric_body() {
    let mut stringly = example_body();
    for (_, value) in stringly.as_object_mut().unwrap() {
        if value.is_number() {
            *value = json!(value.to_string());
        }
    }
    assert_eq!(stringly["Age"], "30");

    let (status, from_strings) = send(app(fixtures::full()), post_json("/predict/salary", &stringly)).await;
    let (_, from_numbers) = send(app(fixtures::full()), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(from_strings.get("error").is_none());
    assert_eq!(from_strings, from_numbers);
}

#[tokio::test]
async fn test_mistyped_and_null_fields_are_rejected() {
    let mut mistyped = example_body();
    mistyped["Age"] = json!("thirty");
    let (status, _) = send(app(fixtures::full()), post_json("/predict/salary", &mistyped)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut null = example_body();
    null["Gender"] = Value::Null;
    let (status, _) = send(app(fixtures::full()), post_json("/predict/salary", &null)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/predict/salary")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(app(fixtures::full()), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_with_credentials() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict/salary")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app(fixtures::full()).oneshot(req).await.unwrap();
    let headers = response.headers();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
}

#[tokio::test]
async fn test_shipped_models_answer_the_example() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
    let artifacts = ModelArtifacts::load(&dir);
    assert!(artifacts.is_ready());
    assert!(artifacts.has_classifier());
    assert!(artifacts.has_cluster());

    let (status, body) = send(app(artifacts), post_json("/predict/salary", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());
    assert!((body["predicted_salary"].as_f64().unwrap() - 5924.67).abs() < 1e-6);
    assert_eq!(body["salary_range"], "Low");
    assert_eq!(body["cluster_description"], "Young, Mid-level, High Growth Potential");
}
