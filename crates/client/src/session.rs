//! Session controller.
//!
//! Owns the single in-memory [`ProfileRecord`] and the derived
//! [`SessionState`], and drives every transition between them: sign-in,
//! session resume, form submission, avatar management, account deletion,
//! and sign-out.
//!
//! All mutation happens on the caller's task when an awaited call
//! completes. Operations are triggered by discrete user actions, so at
//! most one fetch or save is in flight at a time and no locking is needed.

use ridgelea_core::{AllowList, ProfileRecord, SessionState, UserIdentifier};

use crate::error::ClientError;
use crate::identity::{CredentialState, IdentityProvider, SignInOutcome, SignInScopes};
use crate::store::ProfileStore;

/// The membership session: identity, profile record, and derived state.
pub struct Session<I, S> {
    identity: I,
    store: S,
    allow_list: AllowList,
    state: SessionState,
    /// Present exactly while the session is signed in.
    profile: Option<ProfileRecord>,
}

impl<I, S> Session<I, S>
where
    I: IdentityProvider,
    S: ProfileStore,
{
    /// Create a signed-out session.
    ///
    /// The allow-list is injected here rather than compiled in, so tests
    /// and deployments can rotate it freely.
    pub const fn new(identity: I, store: S, allow_list: AllowList) -> Self {
        Self {
            identity,
            store,
            allow_list,
            state: SessionState::SignedOut,
            profile: None,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The profile record, if signed in.
    #[must_use]
    pub const fn profile(&self) -> Option<&ProfileRecord> {
        self.profile.as_ref()
    }

    /// Mutable access to the profile record for form edits.
    ///
    /// The identifier is not reachable through this; it is immutable for
    /// the life of the session.
    #[must_use]
    pub fn profile_mut(&mut self) -> Option<&mut ProfileRecord> {
        self.profile.as_mut()
    }

    /// Whether every required form field is currently filled in.
    ///
    /// Recomputed from the live field values on each call; there is no
    /// cached flag to go stale.
    #[must_use]
    pub fn is_form_complete(&self) -> bool {
        self.profile.as_ref().is_some_and(ProfileRecord::is_complete)
    }

    /// Run the interactive sign-in flow.
    ///
    /// On success the identifier is assigned, name/email claims seed the
    /// form, the state is derived against the allow-list, and the remote
    /// record is fetched. A fetch failure is logged and absorbed; the
    /// seeded defaults stand. A user cancellation leaves the session
    /// signed out and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Identity`] if the provider's flow fails.
    pub async fn sign_in(&mut self) -> Result<SessionState, ClientError> {
        let outcome = self
            .identity
            .request_sign_in(SignInScopes::name_and_email())
            .await?;

        let credential = match outcome {
            SignInOutcome::Credential(credential) => credential,
            SignInOutcome::Cancelled => {
                tracing::debug!("sign-in cancelled by user");
                return Ok(self.state);
            }
        };

        let mut profile = ProfileRecord::new(credential.identifier.clone());
        profile.first_name = credential.given_name.unwrap_or_default();
        profile.last_name = credential.family_name.unwrap_or_default();
        profile.email = credential.email;

        self.profile = Some(profile);
        self.state = SessionState::derive(Some(&credential.identifier), &self.allow_list);
        self.refresh().await;

        Ok(self.state)
    }

    /// Resume a session on app start without re-prompting.
    ///
    /// `identifier` is whatever the platform shell persisted from the last
    /// run; `None` means there is nothing to resume. `Authorized` restores
    /// the session and fetches the record; `Revoked` and `NotFound` reset
    /// local state; `Unknown` (and a provider failure) leave the session
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Currently infallible in the error-surfacing sense; kept as a
    /// `Result` to match the other transitions.
    pub async fn resume(
        &mut self,
        identifier: Option<UserIdentifier>,
    ) -> Result<SessionState, ClientError> {
        let Some(identifier) = identifier else {
            self.reset();
            return Ok(self.state);
        };

        match self.identity.credential_state(&identifier).await {
            Ok(CredentialState::Authorized) => {
                self.profile = Some(ProfileRecord::new(identifier.clone()));
                self.state = SessionState::derive(Some(&identifier), &self.allow_list);
                self.refresh().await;
            }
            Ok(CredentialState::Revoked | CredentialState::NotFound) => self.reset(),
            Ok(CredentialState::Unknown) => {}
            Err(err) => {
                tracing::warn!(error = %err, "credential state check failed; leaving session untouched");
            }
        }

        Ok(self.state)
    }

    /// Submit the completed form to the remote store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when signed out,
    /// [`ClientError::FormIncomplete`] while required fields are unset, and
    /// [`ClientError::Store`] when the save fails. A failed save leaves
    /// the local field values untouched; the caller surfaces the message
    /// and the user retries.
    pub async fn submit(&self) -> Result<(), ClientError> {
        let profile = self.profile.as_ref().ok_or(ClientError::NoSession)?;
        if !profile.is_complete() {
            return Err(ClientError::FormIncomplete);
        }

        self.store.save(profile.user_identifier(), profile).await?;
        Ok(())
    }

    /// Fetch the stored avatar bytes, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when signed out, or
    /// [`ClientError::Store`] on a store failure.
    pub async fn fetch_avatar(&self) -> Result<Option<Vec<u8>>, ClientError> {
        let identifier = self.current_identifier()?;
        Ok(self.store.fetch_avatar(identifier).await?)
    }

    /// Upload a new avatar and record its reference on the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when signed out, or
    /// [`ClientError::Store`] on a store failure (the profile keeps its
    /// previous reference).
    pub async fn save_avatar(&mut self, image: Vec<u8>) -> Result<(), ClientError> {
        let identifier = self.current_identifier()?.clone();
        let asset = self.store.save_avatar(&identifier, image).await?;
        if let Some(profile) = self.profile.as_mut() {
            profile.avatar = Some(asset);
        }
        Ok(())
    }

    /// Delete the stored avatar and clear the profile's reference.
    ///
    /// "No avatar" is a real state: the reference becomes absent rather
    /// than pointing at a placeholder image.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when signed out, or
    /// [`ClientError::Store`] on a store failure.
    pub async fn delete_avatar(&mut self) -> Result<(), ClientError> {
        let identifier = self.current_identifier()?.clone();
        self.store.delete_avatar(&identifier).await?;
        if let Some(profile) = self.profile.as_mut() {
            profile.avatar = None;
        }
        Ok(())
    }

    /// Delete the remote record and end the session.
    ///
    /// On success all local state resets to signed-out. On failure the
    /// session is left as-is so the deletion UI stays up; the error is
    /// logged and surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when signed out, or
    /// [`ClientError::Store`] when the remote delete fails.
    pub async fn delete_account(&mut self) -> Result<(), ClientError> {
        let identifier = self.current_identifier()?.clone();
        match self.store.delete(&identifier).await {
            Ok(()) => {
                self.reset();
                Ok(())
            }
            Err(err) => {
                tracing::error!(user = %identifier, error = %err, "account deletion failed");
                Err(err.into())
            }
        }
    }

    /// Sign out locally.
    ///
    /// Resets every field to its default and the state to signed-out. The
    /// remote record is untouched; signing back in restores it.
    pub fn sign_out(&mut self) {
        self.reset();
    }

    /// Fetch the remote record and overwrite local values.
    ///
    /// `None` (no record yet) keeps the current values; a failure is
    /// logged and absorbed so a transient backend issue never blocks the
    /// user. The allow-list is re-derived after every successful fetch and
    /// remains authoritative over anything the record says.
    async fn refresh(&mut self) {
        let Some(identifier) = self.profile.as_ref().map(|p| p.user_identifier().clone()) else {
            return;
        };

        match self.store.fetch(&identifier).await {
            Ok(Some(fetched)) => {
                self.profile = Some(fetched);
                self.state = SessionState::derive(Some(&identifier), &self.allow_list);
            }
            Ok(None) => {
                tracing::debug!(user = %identifier, "no remote record yet; keeping defaults");
            }
            Err(err) => {
                tracing::warn!(user = %identifier, error = %err, "profile fetch failed; keeping local values");
            }
        }
    }

    fn current_identifier(&self) -> Result<&UserIdentifier, ClientError> {
        self.profile
            .as_ref()
            .map(ProfileRecord::user_identifier)
            .ok_or(ClientError::NoSession)
    }

    fn reset(&mut self) {
        self.profile = None;
        self.state = SessionState::SignedOut;
    }
}
