use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::models::SignalError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Body never made it to the handler as JSON.
    #[error("{0}")]
    Rejected(#[from] JsonRejection),

    /// JSON arrived but cannot be read as a signal: a bare scalar or `null`
    /// (400), or a field of the wrong type (500).
    #[error(transparent)]
    InvalidSignal(#[from] SignalError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
            AppError::InvalidSignal(e @ SignalError::NotAnObject(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::InvalidSignal(e @ SignalError::Malformed(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(ErrorBody {
            status: "error",
            message,
        });

        (status, body).into_response()
    }
}
