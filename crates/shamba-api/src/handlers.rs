//! API Handlers
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shamba_analytics::{aggregate_values, AnalyticsSummary};
use shamba_core::{FarmerRecord, OrderRecord, ProductRecord, SHAMBA_VERSION};
use shamba_qr::{
    build_farmer_profile_payload, build_logistics_payload, build_product_batch,
    build_product_payload, BatchItem, BatchOutcome, FarmerProfilePayload, LogisticsPayload,
    ProductPayload,
};
use shamba_verify::{VerificationReport, VerificationRequest};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductQrRequest {
    pub product: ProductRecord,
    pub farmer: FarmerRecord,
}

#[derive(Debug, Deserialize)]
pub struct FarmerQrRequest {
    pub farmer: FarmerRecord,
}

#[derive(Debug, Deserialize)]
pub struct LogisticsQrRequest {
    pub order: OrderRecord,
}

#[derive(Debug, Deserialize)]
pub struct BatchQrRequest {
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    /// Raw documents; malformed entries are skipped, not rejected
    pub payloads: Vec<Value>,
}

pub async fn product_qr(
    State(state): State<AppState>,
    Json(request): Json<ProductQrRequest>,
) -> Result<Json<ProductPayload>, ApiError> {
    let payload = build_product_payload(&request.product, &request.farmer, &state.trace)?;
    state.metrics.payload_built("product");
    Ok(Json(payload))
}

pub async fn farmer_qr(
    State(state): State<AppState>,
    Json(request): Json<FarmerQrRequest>,
) -> Result<Json<FarmerProfilePayload>, ApiError> {
    let payload = build_farmer_profile_payload(&request.farmer, &state.trace)?;
    state.metrics.payload_built("farmer");
    Ok(Json(payload))
}

pub async fn logistics_qr(
    State(state): State<AppState>,
    Json(request): Json<LogisticsQrRequest>,
) -> Result<Json<LogisticsPayload>, ApiError> {
    let payload = build_logistics_payload(&request.order, &state.trace)?;
    state.metrics.payload_built("logistics");
    Ok(Json(payload))
}

pub async fn batch_qr(
    State(state): State<AppState>,
    Json(request): Json<BatchQrRequest>,
) -> Json<BatchOutcome> {
    let outcome = build_product_batch(request.items, Arc::clone(&state.trace)).await;
    state
        .metrics
        .payloads_built("product", outcome.payloads.len() as u64);
    state.metrics.batch_failed(outcome.failures.len() as u64);
    Json(outcome)
}

/// Always 200: a forged or malformed id is a valid answer, not a failed request.
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerificationRequest>,
) -> Json<VerificationReport> {
    let result = request.verify();
    let outcome = result.rejection().map_or("verified", |reason| reason.code());
    state.metrics.verification(outcome);
    Json(result.report())
}

pub async fn analytics(Json(request): Json<AnalyticsRequest>) -> Json<AnalyticsSummary> {
    Json(aggregate_values(&request.payloads))
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.encode()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": SHAMBA_VERSION })),
    )
}
