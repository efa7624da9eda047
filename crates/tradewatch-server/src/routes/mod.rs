//! HTTP route handlers.

pub mod actions;
pub mod conversation;
pub mod dashboard;
pub mod models;

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use tradewatch_core::TradewatchError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Map core errors to an HTTP status: validation rejections are the caller's
/// fault, everything else is an upstream failure.
pub(crate) fn error_response(err: &TradewatchError) -> (StatusCode, String) {
    if err.is_validation() {
        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    } else {
        (StatusCode::BAD_GATEWAY, err.to_string())
    }
}
