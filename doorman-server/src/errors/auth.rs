use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid passcode")]
    InvalidPasscode,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidPasscode => StatusCode::UNAUTHORIZED,
        }
    }
}
