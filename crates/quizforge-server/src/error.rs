//! Mapping from engine errors and body rejections to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use quizforge_core::QuizError;

/// An error on its way out of a handler. Every variant renders as
/// `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// The engine refused or failed the request.
    Engine(QuizError),
    /// The request body was not acceptable JSON for the endpoint.
    Body(JsonRejection),
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(QuizError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Engine(QuizError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(QuizError::Startup(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Engine(QuizError::NotFound(_)) => "Question not found".to_string(),
            ApiError::Engine(other) => other.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            tracing::error!("request failed: {detail}");
        } else {
            tracing::debug!("rejected request: {detail}");
        }
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::from(QuizError::NotFound("q".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(QuizError::InvalidRequest("empty".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QuizError::Startup(anyhow::anyhow!("kb"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_detail_hides_the_id() {
        let err = ApiError::from(QuizError::NotFound("secret-id".into()));
        assert_eq!(err.detail(), "Question not found");
    }
}
