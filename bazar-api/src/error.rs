use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bazar_core::BazarError;
use serde_json::json;
use tracing::error;

/// HTTP-facing wrapper around the engine's errors.
#[derive(Debug)]
pub struct ApiError(BazarError);

impl From<BazarError> for ApiError {
    fn from(err: BazarError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BazarError::NotFound { .. } => StatusCode::NOT_FOUND,
            BazarError::InvalidArg(_) => StatusCode::BAD_REQUEST,
            // Everything else is a server-side fault; the detail goes to the
            // log, the client gets the message only.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = %self.0, "request failed");
        }
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}
