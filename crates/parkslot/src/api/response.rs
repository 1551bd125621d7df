//! Response envelope and error mapping for the HTTP API.

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::{Error, ErrorKind};

/// Envelope carried by every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Optional human-readable confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrap a payload in a successful envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(data),
        error: None,
    })
}

/// Wrap a payload and a confirmation message in a successful envelope.
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data: Some(data),
        error: None,
    })
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 response with the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// A 404 response with the given message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// A 405 response for a known path hit with the wrong method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "method not allowed".to_string(),
        }
    }

    /// The generic 500 response. Details stay in the logs.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::not_found(err.to_string()),
            ErrorKind::InvalidArgument => Self::bad_request(err.to_string()),
            ErrorKind::StoreUnavailable => {
                error!(target: "parkslot::store", error = %err, "Store error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "slot store unavailable".to_string(),
                }
            }
            ErrorKind::Internal => {
                error!(target: "parkslot::internal", error = %err, "Internal error");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()> {
            success: false,
            message: None,
            data: None,
            error: Some(self.message),
        });
        (self.status, body).into_response()
    }
}

/// Turn a handler panic into the generic 500 response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(target: "parkslot::internal", panic = detail, "Handler panicked");
    ApiError::internal().into_response()
}
