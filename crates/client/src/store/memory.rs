//! In-memory profile store.
//!
//! Hash-map-backed [`ProfileStore`] used by the integration tests and as a
//! local fixture when no record service is configured. Failure injection
//! covers the error paths the remote store can hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use ridgelea_core::{AssetRef, ProfileRecord, RemoteRecord, UserIdentifier};

use super::{ProfileStore, StoreError};

/// An in-memory record store.
///
/// Cheaply cloneable; clones share the same backing map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<UserIdentifier, RemoteRecord>,
    avatars: HashMap<UserIdentifier, Vec<u8>>,
    fail_writes: Option<String>,
    fail_reads: Option<String>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, as if a prior session had saved it.
    pub fn seed(&self, identifier: UserIdentifier, record: &ProfileRecord) {
        self.lock().records.insert(identifier, record.to_remote());
    }

    /// Make every write (save, delete, avatar save/delete) fail with the
    /// given message until [`Self::heal`] is called.
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().fail_writes = Some(message.into());
    }

    /// Make every read (fetch, avatar fetch) fail with the given message
    /// until [`Self::heal`] is called.
    pub fn fail_reads(&self, message: impl Into<String>) {
        self.lock().fail_reads = Some(message.into());
    }

    /// Clear any injected failures.
    pub fn heal(&self) {
        let mut inner = self.lock();
        inner.fail_writes = None;
        inner.fail_reads = None;
    }

    /// Whether a record exists for the identifier.
    #[must_use]
    pub fn contains(&self, identifier: &UserIdentifier) -> bool {
        self.lock().records.contains_key(identifier)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check(failure: Option<&String>) -> Result<(), StoreError> {
    match failure {
        Some(message) => Err(StoreError::Transient(message.clone())),
        None => Ok(()),
    }
}

impl ProfileStore for InMemoryStore {
    async fn fetch(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<ProfileRecord>, StoreError> {
        let inner = self.lock();
        check(inner.fail_reads.as_ref())?;

        Ok(inner
            .records
            .get(identifier)
            .cloned()
            .map(|remote| ProfileRecord::from_remote(identifier.clone(), remote)))
    }

    async fn save(
        &self,
        identifier: &UserIdentifier,
        record: &ProfileRecord,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        check(inner.fail_writes.as_ref())?;

        inner.records.insert(identifier.clone(), record.to_remote());
        Ok(())
    }

    async fn delete(&self, identifier: &UserIdentifier) -> Result<(), StoreError> {
        let mut inner = self.lock();
        check(inner.fail_writes.as_ref())?;

        inner.records.remove(identifier);
        inner.avatars.remove(identifier);
        Ok(())
    }

    async fn fetch_avatar(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.lock();
        check(inner.fail_reads.as_ref())?;

        Ok(inner.avatars.get(identifier).cloned())
    }

    async fn save_avatar(
        &self,
        identifier: &UserIdentifier,
        image: Vec<u8>,
    ) -> Result<AssetRef, StoreError> {
        let mut inner = self.lock();
        check(inner.fail_writes.as_ref())?;

        let asset = AssetRef::new(Uuid::new_v4().to_string());
        inner.avatars.insert(identifier.clone(), image);
        // The new reference is visible on later record fetches
        if let Some(record) = inner.records.get_mut(identifier) {
            record.avatar = Some(asset.clone());
        }
        Ok(asset)
    }

    async fn delete_avatar(&self, identifier: &UserIdentifier) -> Result<(), StoreError> {
        let mut inner = self.lock();
        check(inner.fail_writes.as_ref())?;

        inner.avatars.remove(identifier);
        if let Some(record) = inner.records.get_mut(identifier) {
            record.avatar = None;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> UserIdentifier {
        UserIdentifier::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_missing_record_is_none() {
        let store = InMemoryStore::new();
        assert!(store.fetch(&id("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_fetch() {
        let store = InMemoryStore::new();
        let mut record = ProfileRecord::new(id("user-1"));
        record.first_name = "Ada".to_owned();

        store.save(&id("user-1"), &record).await.unwrap();
        let fetched = store.fetch(&id("user-1")).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_avatar() {
        let store = InMemoryStore::new();
        let record = ProfileRecord::new(id("user-1"));
        store.save(&id("user-1"), &record).await.unwrap();
        store
            .save_avatar(&id("user-1"), vec![1, 2, 3])
            .await
            .unwrap();

        store.delete(&id("user-1")).await.unwrap();
        assert!(store.fetch(&id("user-1")).await.unwrap().is_none());
        assert!(store.fetch_avatar(&id("user-1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_avatar_updates_stored_record_reference() {
        let store = InMemoryStore::new();
        let record = ProfileRecord::new(id("user-1"));
        store.save(&id("user-1"), &record).await.unwrap();

        let asset = store
            .save_avatar(&id("user-1"), vec![0xff; 16])
            .await
            .unwrap();
        let fetched = store.fetch(&id("user-1")).await.unwrap().unwrap();
        assert_eq!(fetched.avatar, Some(asset));

        store.delete_avatar(&id("user-1")).await.unwrap();
        let fetched = store.fetch(&id("user-1")).await.unwrap().unwrap();
        assert_eq!(fetched.avatar, None);
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let store = InMemoryStore::new();
        store.fail_writes("service unavailable");

        let record = ProfileRecord::new(id("user-1"));
        let err = store.save(&id("user-1"), &record).await.unwrap_err();
        assert!(matches!(err, StoreError::Transient(_)));

        store.heal();
        assert!(store.save(&id("user-1"), &record).await.is_ok());
    }
}
