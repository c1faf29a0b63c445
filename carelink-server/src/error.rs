use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("data integrity error: {0}")]
    Integrity(String),

    #[error("database connection error: {0}")]
    StoreUnavailable(String),

    #[error("database query error: {0}")]
    Query(String),

    #[error("database update error: {0}")]
    Persistence(String),

    #[error("OAuth error: {0}")]
    OAuthExchange(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            ServerError::Validation(msg) | ServerError::NotFound(msg) => {
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ServerError::Integrity(detail) => (
                StatusCode::BAD_REQUEST,
                "data integrity error".to_string(),
                Some(detail),
            ),
            ServerError::StoreUnavailable(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database connection error".to_string(),
                Some(detail),
            ),
            ServerError::Query(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database query error".to_string(),
                Some(detail),
            ),
            ServerError::Persistence(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database update error".to_string(),
                Some(detail),
            ),
            ServerError::OAuthExchange(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OAuth Error".to_string(),
                Some(detail),
            ),
            ServerError::Configuration(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration error".to_string(),
                Some(detail),
            ),
            ServerError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
                Some(detail),
            ),
        };

        // `detail` is machine-oriented and only attached when there is one;
        // validation errors are self-describing.
        let mut body = json!({ "error": error });
        if let Some(detail) = detail {
            body["detail"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            e @ StoreError::UserNotFound(_) => ServerError::NotFound(e.to_string()),
            e @ StoreError::AmbiguousUser(_) => ServerError::Integrity(e.to_string()),
            StoreError::Unavailable(detail) => ServerError::StoreUnavailable(detail),
            StoreError::Query(detail) => ServerError::Query(detail),
        }
    }
}

impl From<fitbit_oauth::ExchangeError> for ServerError {
    fn from(err: fitbit_oauth::ExchangeError) -> Self {
        let detail = match err {
            fitbit_oauth::ExchangeError::Provider { detail } => detail,
            other => other.to_string(),
        };
        ServerError::OAuthExchange(detail)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Configuration(err.to_string())
    }
}
