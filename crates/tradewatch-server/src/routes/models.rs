//! Model configuration routes, proxied to the upstream classifier.

use crate::routes::error_response;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tradewatch_types::ModelConfig;

pub async fn get(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelConfig>, (StatusCode, String)> {
    state
        .models
        .model_config()
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

#[derive(Deserialize)]
pub struct SetModelRequest {
    pub model: String,
}

pub async fn set(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetModelRequest>,
) -> Result<Json<ModelConfig>, (StatusCode, String)> {
    state
        .models
        .set_model(&req.model)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}
