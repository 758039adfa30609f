use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fintrack_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failure the caller cannot act on.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    /// Non-success answer from the backend, relayed with its status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("{0}")]
    Internal(String),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Unauthorized => (StatusCode::UNAUTHORIZED, e.to_string()),
                CoreError::Api { status, message } => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message.clone(),
                ),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                _ => {
                    tracing::error!("Request failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_ERROR_MESSAGE.to_string(),
                    )
                }
            },
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Upstream { status, message } => (*status, message.clone()),
            ApiError::Internal(reason) => {
                tracing::error!("Request failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        };
        (status, Json(ErrorBody { message: msg })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
