use axum::http::StatusCode;

/// A lock file that cannot be read or parsed fails the request rather than
/// reading as "everything unlocked".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Lock file {path} is not valid JSON: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("Lock file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
