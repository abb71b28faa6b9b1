//! Reqwest-backed content API adapter for shadow profiles.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use zeroize::Zeroizing;

use super::dto::{CreateItemDto, CreatedItemDto, PublishingsDto, SearchResultsDto};
use crate::domain::ports::{ShadowProfileLookup, ShadowProfileStore, ShadowProfileStoreError};
use crate::domain::{
    EmailAddress, PublishVersion, ShadowProfileDraft, ShadowProfileRef, Zuid,
    composite_search_key,
};
use crate::outbound::http_support::{
    bearer, build_client, endpoint, fetch_json, map_status_error, send,
};

/// Shadow profile store backed by one instance's content API.
///
/// Also serves composite-key lookups through the instance search endpoint.
pub struct ContentHttpStore {
    client: Client,
    api_url: Url,
    model_zuid: Zuid,
    token: Zeroizing<String>,
}

impl ContentHttpStore {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `api_url` is the instance API root, e.g. `https://{instance}.api.zesty.io/v1`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        api_url: Url,
        model_zuid: Zuid,
        token: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            api_url,
            model_zuid,
            token,
        })
    }

    fn item_url(&self, profile: &ShadowProfileRef, tail: &[&str]) -> Url {
        let mut segments = vec![
            "content",
            "models",
            profile.model_zuid.as_str(),
            "items",
            profile.item_zuid.as_str(),
        ];
        segments.extend_from_slice(tail);
        endpoint(&self.api_url, &segments)
    }

    async fn delete(&self, url: Url) -> Result<(), ShadowProfileStoreError> {
        let request = bearer(self.client.delete(url), &self.token);
        let (status, body) = send::<ShadowProfileStoreError>(request).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(map_status_error(status, &body))
        }
    }
}

#[async_trait]
impl ShadowProfileStore for ContentHttpStore {
    async fn create_profile(
        &self,
        draft: &ShadowProfileDraft,
    ) -> Result<ShadowProfileRef, ShadowProfileStoreError> {
        let url = endpoint(
            &self.api_url,
            &["content", "models", self.model_zuid.as_str(), "items", ""],
        );
        let payload = CreateItemDto::new(&self.model_zuid, draft);
        let request = bearer(self.client.post(url), &self.token).json(&payload);
        let created: CreatedItemDto =
            fetch_json::<_, ShadowProfileStoreError>(request, "created item").await?;
        created
            .into_profile_ref(&self.model_zuid)
            .map_err(ShadowProfileStoreError::decode)
    }

    async fn list_publishings(
        &self,
        profile: &ShadowProfileRef,
    ) -> Result<Vec<PublishVersion>, ShadowProfileStoreError> {
        let url = self.item_url(profile, &["publishings"]);
        let request = bearer(self.client.get(url), &self.token);
        let publishings: PublishingsDto =
            fetch_json::<_, ShadowProfileStoreError>(request, "publishings").await?;
        publishings
            .into_versions()
            .map_err(ShadowProfileStoreError::decode)
    }

    async fn unpublish(
        &self,
        profile: &ShadowProfileRef,
        version: &Zuid,
    ) -> Result<(), ShadowProfileStoreError> {
        self.delete(self.item_url(profile, &["publishings", version.as_str()]))
            .await
    }

    async fn delete_profile(&self, profile: &ShadowProfileRef) -> Result<(), ShadowProfileStoreError> {
        self.delete(self.item_url(profile, &[])).await
    }
}

#[async_trait]
impl ShadowProfileLookup for ContentHttpStore {
    /// Search for the `"name - email"` key used as the item title.
    async fn find_profiles(
        &self,
        name: &str,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileStoreError> {
        let mut url = endpoint(&self.api_url, &["search", "items"]);
        url.query_pairs_mut()
            .append_pair("q", &composite_search_key(name, email.as_str()));
        let request = bearer(self.client.get(url), &self.token);
        let results: SearchResultsDto =
            fetch_json::<_, ShadowProfileStoreError>(request, "search results").await?;
        results
            .into_profile_refs(&self.model_zuid)
            .map_err(ShadowProfileStoreError::decode)
    }
}
