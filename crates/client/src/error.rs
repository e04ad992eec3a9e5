//! Unified error handling.
//!
//! Each module has its own focused error type; `ClientError` aggregates
//! them for embedders (the CLI, UI shells) that want a single `?` target.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::AuthError;

/// Top-level error type for the UTE Shop client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Gateway operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_inner_message() {
        let err = ClientError::from(AuthError::NotAuthenticated);
        assert_eq!(err.to_string(), "auth error: not logged in");

        let err = ClientError::from(ApiError::Rejected {
            message: "nope".to_owned(),
        });
        assert_eq!(err.to_string(), "API error: request rejected: nope");
    }
}
