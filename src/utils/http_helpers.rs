use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use crate::store::StoreError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
/// Renders as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Maps store errors to a 500 with a user-facing message; the detail goes to the log.
pub fn store_failure(message: &'static str) -> impl FnOnce(StoreError) -> HTTPError {
    move |e| {
        tracing::error!("Store error: {}", e);
        HTTPError::internal(message)
    }
}

/// Unwraps a JSON body, turning any rejection into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HTTPError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(HTTPError::bad_request("Malformed request body."))
        }
    }
}
