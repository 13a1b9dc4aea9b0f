use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::plugins::chain::client::ChainError;
use crate::plugins::ipfs::pinata::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    pub code: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None, code: None }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::new(StatusCode::BAD_REQUEST, message).with_code("bad_request")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details, code: self.code };
        (self.status, Json(body)).into_response()
    }
}

impl From<(StatusCode, String)> for AppError {
    fn from((status, msg): (StatusCode, String)) -> Self {
        AppError::new(status, msg)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = match &e {
            StoreError::Upload(_) => "Failed to upload to IPFS",
            StoreError::Fetch(_) => "Failed to fetch from IPFS",
            StoreError::Transport(_) => "Failed to reach the pinning gateway",
        };
        AppError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            .with_code("ipfs_upstream")
            .with_details(e.to_string())
    }
}

impl From<ChainError> for AppError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::InvalidAddress(_) => {
                AppError::new(StatusCode::BAD_REQUEST, e.to_string()).with_code("invalid_address")
            }
            ChainError::NoSigner => {
                AppError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()).with_code("no_signer")
            }
            other => AppError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
                .with_code("chain_upstream"),
        }
    }
}
