//! Unified error handling.
//!
//! Each boundary has its own error enum (`StoreError`, `IdentityError`,
//! `ConfigError`); this module folds them into a single `ClientError` for
//! callers that drive the session as a whole.

use thiserror::Error;

use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::store::StoreError;

/// Top-level error type for session operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Identity provider operation failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Record store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The form has unset required fields; submission is unavailable.
    #[error("form is incomplete")]
    FormIncomplete,

    /// The operation requires an active session.
    #[error("no active session")]
    NoSession,
}

impl ClientError {
    /// The message to surface to the user, if this error is user-facing.
    ///
    /// Save and delete failures carry the remote error text through to the
    /// status screen; everything else degrades to a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(err) => err.to_string(),
            Self::FormIncomplete => "Please fill out every required field.".to_owned(),
            Self::NoSession => "Please sign in first.".to_owned(),
            Self::Identity(_) | Self::Config(_) => "Something went wrong. Try again.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_message_passes_through() {
        let err = ClientError::Store(StoreError::Transient("service unavailable".to_owned()));
        assert!(err.user_message().contains("service unavailable"));
    }

    #[test]
    fn test_identity_error_message_is_generic() {
        let err = ClientError::Identity(IdentityError::Provider("token expired".to_owned()));
        assert!(!err.user_message().contains("token expired"));
    }
}
