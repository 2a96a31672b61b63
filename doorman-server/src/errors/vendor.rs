use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// The vendor rejected our configured credentials; the message is the
    /// one the vendor supplied.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Vendor request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected vendor response: {0}")]
    UnexpectedResponse(String),
}

impl VendorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VendorError::InvalidCredentials(_) => StatusCode::BAD_GATEWAY,
            VendorError::Request(_) => StatusCode::BAD_GATEWAY,
            VendorError::UnexpectedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
