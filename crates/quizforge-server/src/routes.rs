//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use quizforge_core::{EvaluationResult, Question};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default)]
    pub allowed_problems: Option<Vec<String>>,
    #[serde(default)]
    pub seed: Option<i64>,
}

fn default_count() -> i64 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferenceResponse {
    pub question_id: String,
    pub reference_answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question_id: String,
    pub answer_text: String,
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /questions/generate
///
/// At most `MAX_QUESTIONS_PER_REQUEST` questions are generated per call.
pub async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = payload?;
    let questions = state.engine.generate_questions(
        req.count,
        req.allowed_problems.as_deref(),
        req.seed,
    )?;
    Ok(Json(GenerateResponse { questions }))
}

/// GET /questions/:question_id/reference
pub async fn reference_answers(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<ReferenceResponse>, ApiError> {
    let reference_answers = state.engine.reference_answers(&question_id)?;
    Ok(Json(ReferenceResponse {
        question_id,
        reference_answers,
    }))
}

/// POST /answers/evaluate
pub async fn evaluate_answer(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let Json(req) = payload?;
    let result = state.engine.evaluate(&req.question_id, &req.answer_text)?;
    Ok(Json(result))
}
