//! HTTP error response mapping.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devicehub_domain::error::DeviceHubError;

/// JSON error body returned by API endpoints.
///
/// `message` explains errors the service understood; `raw_error` carries the
/// underlying decoder or database text unchanged.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_error: Option<String>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            raw_error: None,
        }
    }

    fn raw(raw_error: impl Into<String>) -> Self {
        Self {
            message: None,
            raw_error: Some(raw_error.into()),
        }
    }
}

/// Maps request decoding failures and [`DeviceHubError`] to an HTTP
/// response with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be decoded.
    BadRequest(String),
    /// The service rejected or failed the operation.
    Domain(DeviceHubError),
}

impl From<DeviceHubError> for ApiError {
    fn from(err: DeviceHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(raw) => (StatusCode::BAD_REQUEST, ErrorBody::raw(raw)),
            Self::Domain(DeviceHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(err.to_string()))
            }
            Self::Domain(DeviceHubError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, ErrorBody::message(err.to_string()))
            }
            Self::Domain(DeviceHubError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::raw(err.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into a `500` carrying the panic text as `rawError`.
///
/// Used with [`tower_http::catch_panic::CatchPanicLayer::custom`].
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let raw = if let Some(text) = err.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = err.downcast_ref::<String>() {
        text.clone()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(panic = %raw, "handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::raw(raw))).into_response()
}
