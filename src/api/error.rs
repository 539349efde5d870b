use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::core::ReelError;

pub struct ApiError(pub ReelError);

impl From<ReelError> for ApiError {
    fn from(err: ReelError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ReelError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ReelError::TimeoutError(_) => StatusCode::GATEWAY_TIMEOUT,
            ReelError::StoreError(_)
            | ReelError::BlobError(_)
            | ReelError::IoError(_)
            | ReelError::ConfigParsingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("{} -> {}", self.0, status);
        } else {
            log::warn!("{} -> {}", self.0, status);
        }

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}
