//! HTTP client for the record store web service.
//!
//! One record per user under a container, plus an avatar asset slot:
//!
//! - `GET/PUT/DELETE {base}/containers/{container}/records/{id}`
//! - `GET/PUT/DELETE {base}/containers/{container}/records/{id}/avatar`
//!
//! The service does not retry and neither do we; a configured per-request
//! timeout bounds how long any user action can hang on the network.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use ridgelea_core::{AssetRef, ProfileRecord, RemoteRecord, UserIdentifier};

use super::{ProfileStore, StoreError};
use crate::config::StoreConfig;

/// Client for the record store web service.
///
/// Cheaply cloneable; the HTTP connection pool is shared.
#[derive(Clone)]
pub struct RemoteStore {
    inner: Arc<RemoteStoreInner>,
}

struct RemoteStoreInner {
    client: reqwest::Client,
    base_url: String,
    container: String,
}

#[derive(Serialize)]
struct SaveRecordRequest<'a> {
    fields: &'a RemoteRecord,
}

#[derive(Deserialize)]
struct RecordResponse {
    fields: RemoteRecord,
}

#[derive(Deserialize)]
struct AssetResponse {
    #[serde(rename = "assetRef")]
    asset_ref: String,
}

impl RemoteStore {
    /// Create a new record store client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the API token
    /// is not a valid header value.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|_| StoreError::Transient("API token is not a valid header value".into()))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(RemoteStoreInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                container: config.container.clone(),
            }),
        })
    }

    fn record_url(&self, identifier: &UserIdentifier) -> String {
        format!(
            "{}/containers/{}/records/{}",
            self.inner.base_url, self.inner.container, identifier
        )
    }

    fn avatar_url(&self, identifier: &UserIdentifier) -> String {
        format!("{}/avatar", self.record_url(identifier))
    }
}

/// Convert a non-success response into a `StoreError::Service`.
async fn service_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "no response body".to_owned());
    StoreError::Service { status, message }
}

impl ProfileStore for RemoteStore {
    async fn fetch(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<ProfileRecord>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.record_url(identifier))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: RecordResponse = response.json().await?;
        Ok(Some(ProfileRecord::from_remote(
            identifier.clone(),
            body.fields,
        )))
    }

    async fn save(
        &self,
        identifier: &UserIdentifier,
        record: &ProfileRecord,
    ) -> Result<(), StoreError> {
        let fields = record.to_remote();
        let response = self
            .inner
            .client
            .put(self.record_url(identifier))
            .json(&SaveRecordRequest { fields: &fields })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        Ok(())
    }

    async fn delete(&self, identifier: &UserIdentifier) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.record_url(identifier))
            .send()
            .await?;

        // Deleting an already-absent record is fine
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }

        Err(service_error(response).await)
    }

    async fn fetch_avatar(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.avatar_url(identifier))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let bytes = response.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }

    async fn save_avatar(
        &self,
        identifier: &UserIdentifier,
        image: Vec<u8>,
    ) -> Result<AssetRef, StoreError> {
        let response = self
            .inner
            .client
            .put(self.avatar_url(identifier))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: AssetResponse = response.json().await?;
        Ok(AssetRef::new(body.asset_ref))
    }

    async fn delete_avatar(&self, identifier: &UserIdentifier) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.avatar_url(identifier))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }

        Err(service_error(response).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            base_url: "https://records.example.net/".parse().unwrap(),
            container: "ridgelea".to_owned(),
            api_token: SecretString::from("t0k3n"),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_record_url_strips_trailing_slash() {
        let store = RemoteStore::new(&config()).unwrap();
        let id = UserIdentifier::parse("abc.123").unwrap();
        assert_eq!(
            store.record_url(&id),
            "https://records.example.net/containers/ridgelea/records/abc.123"
        );
    }

    #[test]
    fn test_avatar_url() {
        let store = RemoteStore::new(&config()).unwrap();
        let id = UserIdentifier::parse("abc.123").unwrap();
        assert_eq!(
            store.avatar_url(&id),
            "https://records.example.net/containers/ridgelea/records/abc.123/avatar"
        );
    }
}
