//! # Integration Tests for slide-api
//!
//! Drives the assembled router with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use slide_api::config::{AppConfig, DEFAULT_BODY_LIMIT};
use slide_api::AppState;

fn test_app() -> axum::Router {
    slide_api::app(AppState::default())
}

fn strict_app() -> axum::Router {
    slide_api::app(AppState::new(AppConfig {
        mode: slide_core::ScoringMode::Strict,
        ..AppConfig::default()
    }))
}

async fn post(app: axum::Router, uri: &str, content_type: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn approx(v: &Value, expected: f64) -> bool {
    (v.as_f64().unwrap() - expected).abs() < 1e-12
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health/liveness").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

// -- Single prediction ----------------------------------------------------------

#[tokio::test]
async fn test_predict_safe_sample() {
    let (status, v) = post(
        test_app(),
        "/api/predict",
        "application/json",
        r#"{"slope": 0, "rockSize": "Small", "soilType": "Rock", "vegetation": "Dense", "rainfall": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["result"], "Safe");
    assert!(approx(&v["riskScore"], 0.25));
    assert_eq!(v["probability"], v["riskScore"]);
    assert!(approx(&v["factors"]["vegetation"], 0.05));
}

#[tokio::test]
async fn test_predict_risky_sample() {
    let (status, v) = post(
        test_app(),
        "/api/predict",
        "application/json",
        r#"{"slope": 90, "rockSize": "Large", "soilType": "Clay", "vegetation": "None", "rainfall": 200}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["result"], "Risky");
    assert!(approx(&v["riskScore"], 1.3));
    assert!(approx(&v["factors"]["slope"], 0.3));
    assert!(approx(&v["factors"]["rainfall"], 0.25));
}

#[tokio::test]
async fn test_unknown_category_uses_default_weight() {
    let (status, v) = post(
        test_app(),
        "/api/predict",
        "application/json",
        r#"{"slope": 0, "rockSize": "Unknown", "soilType": "Rock", "vegetation": "Dense", "rainfall": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&v["factors"]["rockSize"], 0.2));
}

#[tokio::test]
async fn test_content_type_is_not_required() {
    let (status, v) = post(
        test_app(),
        "/api/predict",
        "text/plain",
        r#"{"slope": 45, "rockSize": "Medium", "soilType": "Sand", "vegetation": "Moderate", "rainfall": 100}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&v["riskScore"], 0.725));
}

#[tokio::test]
async fn test_malformed_body_returns_error_object() {
    for body in ["", "slope=45", r#"{"slope": "steep"}"#] {
        let (status, v) = post(test_app(), "/api/predict", "application/json", body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {body:?}");
        assert_eq!(v["error"], "Failed to process prediction");
        assert!(v.get("result").is_none());
        assert!(v.get("riskScore").is_none());
    }
}

#[tokio::test]
async fn test_strict_mode_rejects_unknown_category() {
    let (status, v) = post(
        strict_app(),
        "/api/predict",
        "application/json",
        r#"{"slope": 0, "rockSize": "small", "soilType": "Rock", "vegetation": "Dense", "rainfall": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(v["error"].as_str().unwrap().starts_with("rockSize:"));
}

// -- Batch ----------------------------------------------------------------------

#[tokio::test]
async fn test_batch_scores_rows_in_order() {
    let csv = "slope,rockSize,soilType,vegetation,rainfall\n\
               0,Small,Rock,Dense,0\n\
               90,Large,Clay,None,200\n\
               45,Medium,Sand,Moderate,100\n";
    let (status, v) = post(test_app(), "/api/predict/batch", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);

    let preds = v["predictions"].as_array().unwrap();
    assert_eq!(preds.len(), 3);
    assert_eq!(preds[0]["result"], "Safe");
    assert!(approx(&preds[1]["riskScore"], 1.3));
    assert!(approx(&preds[2]["riskScore"], 0.725));

    assert_eq!(v["summary"]["total"], 3);
    assert_eq!(v["summary"]["risky"], 2);
    assert_eq!(v["summary"]["safetyIndex"], 33);
}

#[tokio::test]
async fn test_batch_bad_row_is_unprocessable() {
    let csv = "slope,rockSize,soilType,vegetation,rainfall\n10,Small,Rock,Dense,x\n";
    let (status, v) = post(test_app(), "/api/predict/batch", "text/csv", csv).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(v["error"].as_str().unwrap().starts_with("record 1:"));
}

#[tokio::test]
async fn test_empty_batch_has_null_aggregates() {
    let csv = "slope,rockSize,soilType,vegetation,rainfall\n";
    let (status, v) = post(test_app(), "/api/predict/batch", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["predictions"].as_array().unwrap().is_empty());
    assert!(v["summary"]["safetyIndex"].is_null());
}

#[tokio::test]
async fn test_batch_without_header_is_unprocessable() {
    let (status, v) = post(test_app(), "/api/predict/batch", "text/csv", "45,Large,Clay,Sparse,120\n").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(v["error"].as_str().unwrap().starts_with("missing header row"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let header = "slope,rockSize,soilType,vegetation,rainfall\n";
    let row = "45,Large,Clay,Sparse,120\n";
    let mut body = String::from(header);
    while body.len() <= DEFAULT_BODY_LIMIT {
        body.push_str(row);
    }

    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict/batch")
                .header("content-type", "text/csv")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
