use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Seconds a client should wait before retrying after a word source failure
const DEPENDENCY_RETRY_AFTER_SECS: u64 = 5;

/// Failures surfaced by the game service
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A referenced user or game does not resolve
    #[error("{0}")]
    NotFound(String),

    /// A user name is already taken
    #[error("{0}")]
    Conflict(String),

    /// The operation is not allowed in the game's current state
    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    InvalidInput(String),

    /// The word source could not supply a target word; safe to retry
    #[error("word source unavailable: {0}")]
    DependencyFailure(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl GameError {
    pub fn user_not_found() -> Self {
        GameError::NotFound("A User with that name does not exist!".to_string())
    }

    pub fn game_not_found() -> Self {
        GameError::NotFound("Game not found!".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Conflict(_) => StatusCode::CONFLICT,
            GameError::InvalidState(_) | GameError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GameError::DependencyFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            GameError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for GameError {
    fn from(err: sqlx::Error) -> Self {
        GameError::Storage(err.to_string())
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GameError::Storage(reason) => tracing::error!("Storage failure: {}", reason),
            GameError::DependencyFailure(reason) => {
                tracing::error!("Word source failure: {}", reason)
            }
            _ => tracing::debug!("Request rejected ({}): {}", status, self),
        }

        let body = Json(json!({ "error": self.to_string() }));
        if matches!(self, GameError::DependencyFailure(_)) {
            (
                status,
                [(header::RETRY_AFTER, DEPENDENCY_RETRY_AFTER_SECS.to_string())],
                body,
            )
                .into_response()
        } else {
            (status, body).into_response()
        }
    }
}
