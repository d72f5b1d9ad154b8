use crate::config::ConfigError;
use crate::evaluation::PayloadError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Message returned to HTTP callers for any unusable evaluation payload.
pub const INVALID_PAYLOAD_MESSAGE: &str = "payload invalid";
/// Message returned when a request body exceeds the accepted size.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "payload too large";

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    InvalidPayload(PayloadError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
            AppError::InvalidPayload(err) => write!(f, "{}: {}", INVALID_PAYLOAD_MESSAGE, err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Serialization(err) => Some(err),
            AppError::InvalidPayload(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidPayload(err @ PayloadError::TooLarge { .. }) => {
                tracing::debug!(error = %err, "rejected oversized payload");
                let body = Json(json!({ "error": PAYLOAD_TOO_LARGE_MESSAGE }));
                (StatusCode::PAYLOAD_TOO_LARGE, body).into_response()
            }
            AppError::InvalidPayload(err) => {
                tracing::debug!(error = %err, "rejected evaluation payload");
                let body = Json(json!({ "error": INVALID_PAYLOAD_MESSAGE }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                let body = Json(json!({ "error": other.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<PayloadError> for AppError {
    fn from(value: PayloadError) -> Self {
        Self::InvalidPayload(value)
    }
}
