//! API error types and conversions

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::feeds::{self, FeedError};
use crate::registry::SessionError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Invalid request parameters
    InvalidRequest(String),

    /// The requested symbol has no known feed
    ///
    /// Like InvalidRequest, but the response also lists the supported tokens.
    UnsupportedToken(String),

    /// Resource not found
    NotFound(String),

    /// The upstream price feed could not be queried
    Upstream(String),

    /// Internal server error
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::UnsupportedToken(symbol) = &self {
            let body = Json(json!({
                "success": false,
                "error": format!("Unsupported token: {symbol}"),
                "available_tokens": feeds::available_symbols(),
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnsupportedToken(_) => unreachable!(),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownSymbol(symbol) => ApiError::UnsupportedToken(symbol),
            SessionError::InvalidThreshold | SessionError::InvalidInterval => {
                ApiError::InvalidRequest(err.to_string())
            }
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::UnknownSymbol(symbol) => ApiError::UnsupportedToken(symbol),
            FeedError::Request(_) | FeedError::Status(_) | FeedError::MalformedResponse(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
