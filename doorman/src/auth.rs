//! Access token verification.
//!
//! The service authenticates callers with a single shared secret, compared
//! by exact string equality. Every analyze endpoint runs this check before
//! touching the request payload, so unauthenticated callers never trigger a
//! provider call.

use crate::errors::{Error, Result};

/// Verify a caller-supplied access token against the configured secret.
///
/// Fails with [`Error::Unauthenticated`] when the token is absent or does not
/// exactly equal `expected`.
pub fn verify_access_token(presented: Option<&str>, expected: &str) -> Result<()> {
    if presented != Some(expected) {
        return Err(Error::Unauthenticated {
            message: Some("Invalid or missing access token".to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_matching_token_passes() {
        assert!(verify_access_token(Some("secret"), "secret").is_ok());
    }

    #[test]
    fn test_mismatched_token_rejected() {
        let err = verify_access_token(Some("wrong"), "secret").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Invalid or missing access token");
    }

    #[test]
    fn test_missing_token_rejected() {
        let err = verify_access_token(None, "secret").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_comparison_is_exact() {
        assert!(verify_access_token(Some("Secret"), "secret").is_err());
        assert!(verify_access_token(Some("secret "), "secret").is_err());
        assert!(verify_access_token(Some(""), "secret").is_err());
    }
}
