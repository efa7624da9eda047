//! Conversation modal routes.

use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tradewatch_core::{ConversationView, ModalState};

/// Open the modal on a stored chat: always re-fetches the transcript.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(stored_chat_id): Path<i64>,
) -> Result<Json<ConversationView>, (StatusCode, String)> {
    state.conversations.open(stored_chat_id).await;
    match state.conversations.state().await {
        ModalState::Ready { view } => Ok(Json(view)),
        ModalState::Error { message, .. } => Err((StatusCode::BAD_GATEWAY, message)),
        // A concurrent open for a different chat superseded this one.
        ModalState::Loading { .. } | ModalState::Closed => Err((
            StatusCode::CONFLICT,
            "conversation request superseded".to_string(),
        )),
    }
}

pub async fn close(State(state): State<Arc<AppState>>) -> StatusCode {
    state.conversations.close().await;
    StatusCode::NO_CONTENT
}
