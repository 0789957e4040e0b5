//! Identity provider seam.
//!
//! The platform identity provider is an external collaborator: it runs a
//! user-interactive sign-in flow and can report, without prompting, whether
//! a previously issued credential is still valid. Only the boundary is
//! specified here; concrete providers live with the platform shell that
//! embeds this crate.

use thiserror::Error;

use ridgelea_core::UserIdentifier;

/// Profile claims to request during sign-in.
///
/// Providers only release these claims on the user's first consent, so the
/// controller always asks for both and treats them as a one-time seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInScopes {
    /// Request the user's given and family name.
    pub name: bool,
    /// Request the user's email address.
    pub email: bool,
}

impl SignInScopes {
    /// Request both name and email claims.
    #[must_use]
    pub const fn name_and_email() -> Self {
        Self {
            name: true,
            email: true,
        }
    }
}

/// Result of a completed sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The user consented; a credential was issued.
    Credential(IdentityCredential),
    /// The user dismissed the flow. Not an error.
    Cancelled,
}

/// The credential issued by the provider after consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCredential {
    /// Stable opaque identifier for this user.
    pub identifier: UserIdentifier,
    /// Given name claim, released on first consent only.
    pub given_name: Option<String>,
    /// Family name claim, released on first consent only.
    pub family_name: Option<String>,
    /// Email claim, released on first consent only.
    pub email: Option<String>,
}

/// State of a previously issued credential, checked on app start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// The credential is still valid; the session can resume.
    Authorized,
    /// The user revoked access; the session must end.
    Revoked,
    /// The provider has no record of this credential.
    NotFound,
    /// The provider could not determine the state.
    Unknown,
}

/// Errors reported by the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider's sign-in or credential-state call failed.
    #[error("provider error: {0}")]
    Provider(String),
}

/// An external identity provider.
///
/// Both operations are user-serialized: the UI issues at most one at a
/// time, and `request_sign_in` suspends for as long as the user keeps the
/// provider's flow open.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Run the interactive sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Provider`] if the flow fails outright.
    /// A user dismissal is [`SignInOutcome::Cancelled`], not an error.
    async fn request_sign_in(&self, scopes: SignInScopes)
    -> Result<SignInOutcome, IdentityError>;

    /// Check whether a previously issued credential is still valid.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Provider`] if the provider is unreachable.
    async fn credential_state(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<CredentialState, IdentityError>;
}
