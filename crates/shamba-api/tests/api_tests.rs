//! Router-level tests for the /v1 endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use shamba_api::{create_app, AppState};
use shamba_core::{TraceConfig, TraceabilityId};
use tower::util::ServiceExt;

const BASE_URL: &str = "https://shamba2shelf.co.ke";

fn setup_app() -> axum::Router {
    let trace = TraceConfig::new(BASE_URL).unwrap();
    create_app(AppState::new(trace).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn product_body() -> Value {
    json!({
        "product": {
            "_id": "p-100",
            "name": "Kirinyaga AA",
            "variety": "SL28",
            "processingMethod": "Washed",
            "qualityScore": 86.5,
            "flavorNotes": ["blackcurrant", "grapefruit", "molasses", "cocoa"]
        },
        "farmer": {
            "_id": "f-7",
            "name": "Wanjiru Kamau",
            "county": "Kirinyaga",
            "farmSize": 2.5,
            "altitudeRange": { "min": 1600, "max": 1850 },
            "certifications": ["Rainforest Alliance"],
            "verified": true
        }
    })
}

#[tokio::test]
async fn test_health() {
    let response = setup_app().oneshot(get("/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], shamba_core::SHAMBA_VERSION);
}

#[tokio::test]
async fn test_product_qr() {
    let response = setup_app()
        .oneshot(post_json("/v1/qr/product", product_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    let id = json["traceabilityId"].as_str().unwrap();
    assert!(id.starts_with("S2S-"));
    assert_eq!(json["verificationUrl"], format!("{BASE_URL}/trace/p-100"));
    assert_eq!(json["consumerSummary"]["farm"]["altitude"], "1600-1850m");
    assert_eq!(json["consumerSummary"]["farm"]["size"], "2.5 acres");
    assert_eq!(
        json["consumerSummary"]["product"]["flavorNotes"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
    assert_eq!(json["renderHints"]["consumerSummary"]["errorCorrection"], "H");
    assert!(json["payloadDigest"].as_str().unwrap().starts_with("blake3:"));
}

#[tokio::test]
async fn test_product_qr_without_id_is_bad_request() {
    let mut body = product_body();
    body["product"]
        .as_object_mut()
        .unwrap()
        .remove("_id");

    let response = setup_app()
        .oneshot(post_json("/v1/qr/product", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["code"], "INPUT");
}

#[tokio::test]
async fn test_issued_id_verifies() {
    let app = setup_app();
    let response = app
        .clone()
        .oneshot(post_json("/v1/qr/product", product_body()))
        .await
        .unwrap();
    let payload = extract_json(response.into_body()).await;

    let response = app
        .oneshot(post_json(
            "/v1/verify",
            json!({
                "traceabilityId": payload["traceabilityId"],
                "productId": "p-100",
                "farmerId": "f-7"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["reason"], "Verified");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_verify_rejections_are_ok_responses() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/verify",
            json!({ "traceabilityId": "not-a-valid-id", "productId": "p", "farmerId": "f" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["valid"], false);
    assert_eq!(json["code"], "invalid_format");

    let id = TraceabilityId::compose("p-100", "f-7", 1_704_067_200_000);
    let response = app
        .oneshot(post_json(
            "/v1/verify",
            json!({ "traceabilityId": id.as_str(), "productId": "p-100", "farmerId": "f-8" }),
        ))
        .await
        .unwrap();
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["valid"], false);
    assert_eq!(json["reason"], "Farmer hash mismatch");
}

#[tokio::test]
async fn test_farmer_qr() {
    let response = setup_app()
        .oneshot(post_json(
            "/v1/qr/farmer",
            json!({ "farmer": product_body()["farmer"].clone() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["profileUrl"], format!("{BASE_URL}/farmers/f-7"));
    assert_eq!(json["profile"]["farmerId"], "f-7");
}

#[tokio::test]
async fn test_logistics_qr_keeps_existing_tracking_number() {
    let response = setup_app()
        .oneshot(post_json(
            "/v1/qr/logistics",
            json!({
                "order": {
                    "_id": "o-1",
                    "trackingNumber": "S2SABC123",
                    "quantity": 60,
                    "unit": "kg"
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["trackingUrl"], format!("{BASE_URL}/track/o-1"));
    assert_eq!(json["trackingNumber"], "S2SABC123");
    assert_eq!(json["trackingNumberGenerated"], false);
    assert_eq!(json["shipment"]["quantity"], "60 kg");
}

#[tokio::test]
async fn test_batch_reports_failures_by_index() {
    let good = product_body();
    let response = setup_app()
        .oneshot(post_json(
            "/v1/qr/batch",
            json!({
                "items": [
                    good.clone(),
                    { "product": {}, "farmer": good["farmer"].clone() },
                    good
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["payloads"].as_array().unwrap().len(), 2);
    let failures = json["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["index"], 1);
    assert_eq!(failures[0]["code"], "INPUT");
}

#[tokio::test]
async fn test_analytics_over_built_payloads() {
    let app = setup_app();
    let response = app
        .clone()
        .oneshot(post_json("/v1/qr/product", product_body()))
        .await
        .unwrap();
    let payload = extract_json(response.into_body()).await;

    let response = app
        .oneshot(post_json(
            "/v1/analytics",
            json!({ "payloads": [payload, { "unexpected": true }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["byVariety"]["SL28"], 1);
    assert_eq!(json["byCounty"]["Kirinyaga"], 1);
    assert_eq!(json["qualityDistribution"]["high"], 1);
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let app = setup_app();
    app.clone()
        .oneshot(post_json("/v1/qr/product", product_body()))
        .await
        .unwrap();

    let response = app.oneshot(get("/v1/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("shamba_qr_payloads_total{kind=\"product\"} 1"));
}

#[tokio::test]
async fn test_unknown_route() {
    let response = setup_app().oneshot(get("/v1/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
