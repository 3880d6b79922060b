pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::interview::handlers as chat;
use crate::resume::handlers as resume;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::index_handler))
        .route("/api/v1/health", get(health::health_handler))
        .route("/api/v1/health/", get(health::health_handler))
        // Resume API
        .route("/api/v1/resume/parse", post(resume::handle_parse_resume))
        // Chat API
        .route(
            "/api/v1/chat/generate-questions",
            post(chat::handle_generate_questions),
        )
        .route("/api/v1/chat/score-answer", post(chat::handle_score_answer))
        .route(
            "/api/v1/chat/generate-summary",
            post(chat::handle_generate_summary),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
