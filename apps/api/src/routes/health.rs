use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service banner with navigation links.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Swipe Interview API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI-powered interview platform API for resume parsing, question generation, and answer scoring",
        "links": {
            "health": "/api/v1/health/"
        },
        "endpoints": {
            "health_check": "GET /api/v1/health/",
            "parse_resume": "POST /api/v1/resume/parse",
            "generate_questions": "POST /api/v1/chat/generate-questions",
            "score_answer": "POST /api/v1/chat/score-answer",
            "generate_summary": "POST /api/v1/chat/generate-summary"
        }
    }))
}

/// GET /api/v1/health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Resume parser service is running"
    }))
}
