use super::{AuthError, StoreError, VendorError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authorization error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Vendor error: {0}")]
    VendorError(#[from] VendorError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
