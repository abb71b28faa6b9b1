//! Reqwest-backed dataset host adapter.
//!
//! The dataset host is gated by a `zpw` query password rather than the
//! bearer token, so requests here carry no `Authorization` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use zeroize::Zeroizing;

use super::dto::{LocationOptionsDto, UsersByEmailDto};
use crate::domain::ports::{
    LocationCatalogue, LocationCatalogueError, ShadowProfileLookup, ShadowProfileStoreError,
};
use crate::domain::{EmailAddress, LocationOption, ShadowProfileRef};
use crate::outbound::http_support::{build_client, endpoint, fetch_json};

const DATASET_ROOT: [&str; 2] = ["datasets", "mobile_editor"];

/// Dataset host adapter serving location options and email lookups.
pub struct DatasetHttpSource {
    client: Client,
    dataset_url: Url,
    password: Zeroizing<String>,
}

impl DatasetHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        dataset_url: Url,
        password: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            dataset_url,
            password,
        })
    }

    fn dataset_endpoint(&self, tail: &[&str], params: &[(&str, &str)]) -> Url {
        let segments: Vec<&str> = DATASET_ROOT.iter().chain(tail).copied().collect();
        let mut url = endpoint(&self.dataset_url, &segments);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("zpw", self.password.as_str());
        }
        url
    }
}

#[async_trait]
impl LocationCatalogue for DatasetHttpSource {
    async fn list_location_options(&self) -> Result<Vec<LocationOption>, LocationCatalogueError> {
        let url = self.dataset_endpoint(&["locations", "all_locations_options.json"], &[]);
        let options: LocationOptionsDto =
            fetch_json::<_, LocationCatalogueError>(self.client.get(url), "location options")
                .await?;
        Ok(options.into_options())
    }
}

#[async_trait]
impl ShadowProfileLookup for DatasetHttpSource {
    /// Query `getUsersByEmail`; `name` is not used.
    async fn find_profiles(
        &self,
        _name: &str,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileStoreError> {
        let url = self.dataset_endpoint(
            &["query", "getUsersByEmail.json"],
            &[("email", email.as_str())],
        );
        let matches: UsersByEmailDto =
            fetch_json::<_, ShadowProfileStoreError>(self.client.get(url), "email lookup")
                .await?;
        matches
            .into_profile_refs()
            .map_err(ShadowProfileStoreError::decode)
    }
}
