use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{services::word_source::GenerationError, state::round::RoundError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller has no round in progress.
    #[error("no active round for this client")]
    NoActiveSession,
    /// Requested player index is outside the roster.
    #[error("player index {index} is out of range (0..{len})")]
    InvalidIndex {
        /// Index as requested.
        index: i64,
        /// Roster size.
        len: usize,
    },
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Generation was requested, failed, and the deployment does not fall back.
    #[error("word generation failed")]
    Generation(#[from] GenerationError),
}

impl From<RoundError> for ServiceError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::NoPlayers => {
                ServiceError::InvalidInput("a round requires at least one player".into())
            }
            RoundError::InvalidIndex { index, len } => ServiceError::InvalidIndex { index, len },
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {message}")]
    BadRequest {
        /// Stable error code.
        code: &'static str,
        /// Human readable message.
        message: String,
    },
    /// Requested resource not found.
    #[error("not found: {message}")]
    NotFound {
        /// Stable error code.
        code: &'static str,
        /// Human readable message.
        message: String,
    },
    /// Internal server error; `detail` keeps the technical cause apart from the user message.
    #[error("internal error: {message}")]
    Internal {
        /// Stable error code.
        code: &'static str,
        /// Message safe to show to players.
        message: String,
        /// Technical cause.
        detail: Option<String>,
    },
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => *code,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NoActiveSession => AppError::NotFound {
                code: "no_active_session",
                message: "no round in progress; start a new round".into(),
            },
            err @ ServiceError::InvalidIndex { .. } => AppError::BadRequest {
                code: "invalid_index",
                message: err.to_string(),
            },
            ServiceError::InvalidInput(message) => AppError::BadRequest {
                code: "invalid_input",
                message,
            },
            ServiceError::Generation(source) => AppError::Internal {
                code: "generation_failed",
                message: "could not generate a word; try again or use the word list".into(),
                detail: Some(source.to_string()),
            },
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable error code (e.g. `no_active_session`).
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Technical cause, present for upstream failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let code = self.code().to_owned();
        let payload = match self {
            AppError::BadRequest { message, .. } | AppError::NotFound { message, .. } => ErrorBody {
                code,
                message,
                detail: None,
            },
            AppError::Internal {
                message, detail, ..
            } => ErrorBody {
                code,
                message,
                detail,
            },
        };

        (status, Json(payload)).into_response()
    }
}
