/**
 * Error Conversion
 *
 * `BackendError` renders as a JSON body with the status code it maps to:
 *
 * ```json
 * {"error": "Only the board creator can do this", "kind": "AccessDenied", "status": 403}
 * ```
 */
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Board] request failed: {}", self);
        } else {
            tracing::warn!("[Board] request rejected ({}): {}", self.kind(), self);
        }

        let body = json!({
            "error": self.message(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
