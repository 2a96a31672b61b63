pub mod api;
pub mod auth;
pub mod store;
pub mod vendor;

pub use api::ApiError;
pub use auth::AuthError;
pub use store::StoreError;
pub use vendor::VendorError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::AuthError(e) => (e.status_code(), e.to_string()),
            ApiError::VendorError(e) => (e.status_code(), e.to_string()),
            ApiError::StoreError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Lock store error: {}", e);
                (e.status_code(), "Lock store unavailable".to_string())
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        // The flat body shape is a compatibility contract with the legacy
        // automations that consume this proxy.
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
