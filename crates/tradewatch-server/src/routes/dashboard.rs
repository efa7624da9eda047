//! Dashboard snapshot and pagination routes.

use crate::state::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tradewatch_core::DashboardSnapshot;
use tradewatch_types::FilterType;

pub async fn get(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

/// Re-fetch at the current filter state (the error panel's retry affordance).
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    state.dashboard.refresh().await;
    Json(state.dashboard.snapshot().await)
}

#[derive(Deserialize)]
pub struct SetFilterRequest {
    pub filter_type: FilterType,
}

pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetFilterRequest>,
) -> Json<DashboardSnapshot> {
    state.dashboard.set_filter(req.filter_type).await;
    Json(state.dashboard.snapshot().await)
}

#[derive(Deserialize)]
pub struct SetPageRequest {
    pub page: u32,
}

#[derive(Serialize)]
pub struct SetPageResponse {
    /// False when the request was out of bounds and nothing was fetched.
    pub applied: bool,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

pub async fn set_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPageRequest>,
) -> Json<SetPageResponse> {
    let applied = state.dashboard.set_page(req.page).await;
    Json(SetPageResponse {
        applied,
        snapshot: state.dashboard.snapshot().await,
    })
}

#[derive(Deserialize)]
pub struct SetPageSizeRequest {
    pub page_size: u32,
}

pub async fn set_page_size(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPageSizeRequest>,
) -> Json<DashboardSnapshot> {
    state.dashboard.set_page_size(req.page_size).await;
    Json(state.dashboard.snapshot().await)
}
