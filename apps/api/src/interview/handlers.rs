//! Axum route handlers for the chat (interview) API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::interview::questions::generate_questions;
use crate::interview::scoring::score_answer;
use crate::interview::summary::generate_summary;
use crate::models::interview::{
    QuestionsResponse, ScoreRequest, ScoreResponse, SummaryRequest, SummaryResponse,
};
use crate::state::AppState;

/// POST /api/v1/chat/generate-questions
///
/// Asks the model for six full-stack questions (2 easy, 2 medium, 2 hard).
pub async fn handle_generate_questions(
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions = generate_questions(state.llm.as_ref()).await?;
    Ok(Json(QuestionsResponse {
        success: true,
        questions,
    }))
}

/// POST /api/v1/chat/score-answer
pub async fn handle_score_answer(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    let (Some(question), Some(answer)) = (request.question, request.answer) else {
        return Err(AppError::Validation(
            "Missing question or answer data".to_string(),
        ));
    };
    // A present but null answer is scored as an empty one.
    let answer = answer.unwrap_or_default();

    let response = score_answer(state.llm.as_ref(), &question, &answer).await?;
    Ok(Json(response))
}

/// POST /api/v1/chat/generate-summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(request) = payload?;
    let candidate = request
        .candidate
        .ok_or_else(|| AppError::Validation("Missing candidate data".to_string()))?;

    let summary = generate_summary(state.llm.as_ref(), &candidate).await?;
    Ok(Json(SummaryResponse {
        success: true,
        summary,
    }))
}
