//! Profile store seam.
//!
//! The remote store holds one record per user, keyed by the opaque
//! identifier, plus an avatar asset slot addressable independently of the
//! record fields. "No record yet" is `Ok(None)`, never an error: a brand
//! new user fetching before their first submit is the normal path.

mod memory;
mod remote;

pub use memory::InMemoryStore;
pub use remote::RemoteStore;

use thiserror::Error;

use ridgelea_core::{AssetRef, ProfileRecord, UserIdentifier};

/// Errors that can occur when talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned an error response.
    #[error("store error: {status} - {message}")]
    Service { status: u16, message: String },

    /// A transient failure with no more specific shape.
    #[error("{0}")]
    Transient(String),
}

/// A single-record cloud store for profile data.
///
/// Operations are serialized by the caller: the session controller never
/// has two calls for the same record in flight, so implementations need no
/// locking of their own.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    /// Fetch the user's record.
    ///
    /// Returns `Ok(None)` if no record has ever been saved for this
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn fetch(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<ProfileRecord>, StoreError>;

    /// Save the user's record, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn save(
        &self,
        identifier: &UserIdentifier,
        record: &ProfileRecord,
    ) -> Result<(), StoreError>;

    /// Delete the user's record and its avatar asset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn delete(&self, identifier: &UserIdentifier) -> Result<(), StoreError>;

    /// Fetch the avatar asset bytes, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn fetch_avatar(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Upload avatar bytes and return the reference the record should carry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn save_avatar(
        &self,
        identifier: &UserIdentifier,
        image: Vec<u8>,
    ) -> Result<AssetRef, StoreError>;

    /// Delete the avatar asset. Deleting an absent avatar is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport or service failure.
    async fn delete_avatar(&self, identifier: &UserIdentifier) -> Result<(), StoreError>;
}
