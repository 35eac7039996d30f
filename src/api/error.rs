//! Client-facing errors for the account endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::handlers::types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Email already registered")]
    Conflict,
    /// Unknown email and wrong password both map here.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing payload")]
    MissingPayload,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AccountError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Conflict | Self::InvalidCredentials | Self::MissingPayload => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("request failed: {err:#}");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
