use crate::configs::settings::Auth;
use crate::errors::AuthError;

/// Validates the `"<name>:<passcode>"` composite path segment against the
/// single configured passcode.
#[derive(Clone)]
pub struct PasscodeService {
    passcode: String,
}

impl PasscodeService {
    pub fn new(auth: Auth) -> Self {
        Self {
            passcode: auth.passcode,
        }
    }

    /// Extract the bare device name from a composite segment.
    ///
    /// An absent or empty segment is not an authorization failure; it means
    /// "no name supplied" and yields `None` (the whole-fleet status view).
    /// The split is on the first `:`, so a passcode containing `:` still
    /// matches as long as the remainder equals it exactly. The name half may
    /// itself be empty, which callers treat as "all devices".
    pub fn authorize(&self, segment: Option<&str>) -> Result<Option<String>, AuthError> {
        let Some(raw) = segment else {
            return Ok(None);
        };

        if raw.is_empty() {
            return Ok(None);
        }

        let Some((name, passcode)) = raw.split_once(':') else {
            return Err(AuthError::InvalidPasscode);
        };

        if passcode != self.passcode {
            return Err(AuthError::InvalidPasscode);
        }

        Ok(Some(name.to_string()))
    }
}
