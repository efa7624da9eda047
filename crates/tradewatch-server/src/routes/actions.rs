//! Command routes: the control-panel actions and feedback submission.

use crate::routes::error_response;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tradewatch_core::{CommandKind, CommandState};
use tradewatch_types::{FeedbackVerdict, FraudAnalysisOutcome};

#[derive(Deserialize)]
pub struct LimitRequest {
    pub limit: i64,
}

#[derive(Serialize)]
pub struct ActionStatesResponse {
    pub states: BTreeMap<CommandKind, CommandState>,
}

pub async fn states(State(state): State<Arc<AppState>>) -> Json<ActionStatesResponse> {
    Json(ActionStatesResponse {
        states: state.actions.states(),
    })
}

pub async fn fetch_chats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LimitRequest>,
) -> Result<Json<ActionStatesResponse>, (StatusCode, String)> {
    state
        .actions
        .fetch_chats(req.limit)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionStatesResponse {
        states: state.actions.states(),
    }))
}

pub async fn analyze_chats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LimitRequest>,
) -> Result<Json<ActionStatesResponse>, (StatusCode, String)> {
    state
        .actions
        .analyze_chats(req.limit)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionStatesResponse {
        states: state.actions.states(),
    }))
}

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn reset_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ActionStatesResponse>, (StatusCode, String)> {
    state
        .actions
        .reset_analysis(req.confirm)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionStatesResponse {
        states: state.actions.states(),
    }))
}

pub async fn analyze_fraud(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LimitRequest>,
) -> Result<Json<FraudAnalysisOutcome>, (StatusCode, String)> {
    let outcome = state
        .actions
        .analyze_fraud(req.limit)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(outcome))
}

/// The last fraud outcome, if any; a transient result set, not part of Stats.
pub async fn fraud_result(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FraudAnalysisOutcome>, (StatusCode, String)> {
    state
        .actions
        .last_fraud_outcome()
        .await
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "no fraud analysis has run".to_string()))
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub feedback: FeedbackVerdict,
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(result_id): Path<i64>,
    Json(req): Json<FeedbackRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .actions
        .submit_feedback(result_id, req.feedback, req.reason)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
