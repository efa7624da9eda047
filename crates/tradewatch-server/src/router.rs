//! HTTP router assembly.

use crate::routes;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the full application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Dashboard view
        .route("/dashboard", get(routes::dashboard::get))
        .route("/dashboard/refresh", post(routes::dashboard::refresh))
        .route("/dashboard/filter", post(routes::dashboard::set_filter))
        .route("/dashboard/page", post(routes::dashboard::set_page))
        .route("/dashboard/page-size", post(routes::dashboard::set_page_size))
        // Conversation modal
        .route("/conversation/{stored_chat_id}", get(routes::conversation::get))
        .route("/conversation/close", post(routes::conversation::close))
        // Control-panel commands
        .route("/actions", get(routes::actions::states))
        .route("/actions/fetch-chats", post(routes::actions::fetch_chats))
        .route("/actions/analyze-chats", post(routes::actions::analyze_chats))
        .route("/actions/reset-analysis", post(routes::actions::reset_analysis))
        .route("/actions/analyze-fraud", post(routes::actions::analyze_fraud))
        .route("/actions/fraud-result", get(routes::actions::fraud_result))
        // Feedback
        .route(
            "/results/{result_id}/feedback",
            post(routes::actions::submit_feedback),
        )
        // Model configuration
        .route(
            "/model-config",
            get(routes::models::get).post(routes::models::set),
        )
        .route("/health", get(routes::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
