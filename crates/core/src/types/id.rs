//! Opaque identifier types.
//!
//! Identity providers issue a stable, opaque user identifier on first
//! consent. The record store keys everything by that identifier and issues
//! its own opaque references for stored binary assets.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserIdentifier`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UserIdentifierError {
    /// The input string is empty.
    #[error("user identifier cannot be empty")]
    Empty,
}

/// A stable, opaque user identifier issued by the identity provider.
///
/// The identifier is the primary key for the user's remote record. It is
/// assigned at sign-in and never changes for the lifetime of a session;
/// an empty identifier is not representable.
///
/// ## Examples
///
/// ```
/// use ridgelea_core::UserIdentifier;
///
/// assert!(UserIdentifier::parse("001238.f786016f521b47ae9c336ccfc43bfa94.1609").is_ok());
/// assert!(UserIdentifier::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserIdentifier(String);

impl UserIdentifier {
    /// Parse a `UserIdentifier` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdentifierError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, UserIdentifierError> {
        if s.is_empty() {
            return Err(UserIdentifierError::Empty);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserIdentifier` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserIdentifier {
    type Err = UserIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque reference to a binary asset held by the record store.
///
/// The store issues a reference when an asset is uploaded; the profile
/// record carries the reference, never the bytes. "No avatar" is an absent
/// reference, not a placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Create an asset reference from a store-issued token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_identifier() {
        let id = UserIdentifier::parse("001238.f786016f521b47ae9c336ccfc43bfa94.1609").unwrap();
        assert_eq!(id.as_str(), "001238.f786016f521b47ae9c336ccfc43bfa94.1609");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            UserIdentifier::parse(""),
            Err(UserIdentifierError::Empty)
        ));
    }

    #[test]
    fn test_from_str() {
        let id: UserIdentifier = "some-opaque-id".parse().unwrap();
        assert_eq!(id.as_str(), "some-opaque-id");
    }

    #[test]
    fn test_display() {
        let id = UserIdentifier::parse("abc.123").unwrap();
        assert_eq!(format!("{id}"), "abc.123");
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserIdentifier::parse("abc.123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc.123\"");

        let parsed: UserIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_asset_ref_roundtrip() {
        let asset = AssetRef::new("asset-token-1");
        let json = serde_json::to_string(&asset).unwrap();
        let parsed: AssetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, asset);
    }
}
