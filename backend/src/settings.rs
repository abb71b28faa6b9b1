//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `STAFF_ADMIN_*` environment variables, CLI flags, or a
//! configuration file. [`AdminSettings::directory_config`] validates them
//! into a [`DirectoryConfig`] that is handed to the outbound adapters at
//! construction; nothing reads the environment after startup.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{ProfileLookup, Zuid};

const DEFAULT_ACCOUNTS_API_URL: &str = "https://accounts.api.zesty.io/v1";
const DEFAULT_INSTANCE_API_URL: &str = "https://{instance}.api.zesty.io/v1";
const INSTANCE_PLACEHOLDER: &str = "{instance}";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 60;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STAFF_ADMIN")]
pub struct AdminSettings {
    /// Instance every directory call is scoped to.
    pub instance_zuid: Option<String>,
    /// Content model holding staff shadow profiles.
    pub content_model_zuid: Option<String>,
    /// Developer token sent as the bearer credential.
    pub developer_token: Option<String>,
    /// Accounts API base URL.
    pub accounts_api_url: Option<String>,
    /// Instance content API URL; `{instance}` is replaced by the instance ZUID.
    pub instance_api_url: Option<String>,
    /// Dataset host serving location options and the email lookup.
    pub dataset_url: Option<String>,
    /// Password appended to dataset requests as `zpw`.
    pub dataset_password: Option<String>,
    /// Fallback profile lookup: `email` or `composite`.
    pub profile_lookup: Option<String>,
    /// Per-request timeout for upstream calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Maximum age of cached directory reads, in seconds.
    pub cache_max_age_secs: Option<u64>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
}

/// Reasons the raw settings cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required value was absent or blank.
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    /// An identifier failed validation.
    #[error("{field} is not a valid ZUID: {value}")]
    InvalidZuid { field: &'static str, value: String },
    /// A URL did not parse.
    #[error("{field} is not a valid URL: {message}")]
    InvalidUrl {
        field: &'static str,
        message: String,
    },
    /// The lookup strategy was not recognised.
    #[error("unknown profile lookup strategy: {0}")]
    UnknownLookup(String),
    /// The bind address did not parse.
    #[error("invalid bind address: {0}")]
    InvalidBindAddr(String),
    /// A duration was zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Validated configuration for the outbound adapters and services.
pub struct DirectoryConfig {
    /// Instance scope.
    pub instance_zuid: Zuid,
    /// Staff content model.
    pub content_model_zuid: Zuid,
    /// Bearer credential.
    pub developer_token: Zeroizing<String>,
    /// Accounts API base.
    pub accounts_api_url: Url,
    /// Instance content API base with the instance substituted.
    pub instance_api_url: Url,
    /// Dataset host base.
    pub dataset_url: Url,
    /// Dataset password.
    pub dataset_password: Zeroizing<String>,
    /// Fallback lookup strategy.
    pub profile_lookup: ProfileLookup,
    /// Upstream request timeout.
    pub request_timeout: Duration,
    /// Read cache maximum age.
    pub cache_max_age: Duration,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("instance_zuid", &self.instance_zuid)
            .field("content_model_zuid", &self.content_model_zuid)
            .field("developer_token", &"<redacted>")
            .field("accounts_api_url", &self.accounts_api_url.as_str())
            .field("instance_api_url", &self.instance_api_url.as_str())
            .field("dataset_url", &self.dataset_url.as_str())
            .field("dataset_password", &"<redacted>")
            .field("profile_lookup", &self.profile_lookup)
            .field("request_timeout", &self.request_timeout)
            .field("cache_max_age", &self.cache_max_age)
            .finish()
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(SettingsError::Missing(field))
}

fn parse_zuid(value: Option<&str>, field: &'static str) -> Result<Zuid, SettingsError> {
    let raw = required(value, field)?;
    Zuid::new(raw).map_err(|_| SettingsError::InvalidZuid {
        field,
        value: raw.to_owned(),
    })
}

fn parse_url(raw: &str, field: &'static str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::InvalidUrl {
        field,
        message: err.to_string(),
    })
}

fn positive_secs(value: u64, field: &'static str) -> Result<Duration, SettingsError> {
    if value == 0 {
        return Err(SettingsError::ZeroDuration(field));
    }
    Ok(Duration::from_secs(value))
}

impl AdminSettings {
    /// Accounts API base, falling back to the public endpoint.
    pub fn accounts_api_url(&self) -> &str {
        self.accounts_api_url
            .as_deref()
            .unwrap_or(DEFAULT_ACCOUNTS_API_URL)
    }

    /// Instance API template, falling back to the public endpoint.
    pub fn instance_api_url(&self) -> &str {
        self.instance_api_url
            .as_deref()
            .unwrap_or(DEFAULT_INSTANCE_API_URL)
    }

    /// Upstream timeout in seconds.
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Cache maximum age in seconds.
    pub fn cache_max_age_secs(&self) -> u64 {
        self.cache_max_age_secs.unwrap_or(DEFAULT_CACHE_MAX_AGE_SECS)
    }

    /// Fallback lookup strategy; defaults to the email lookup.
    ///
    /// # Errors
    /// Returns [`SettingsError::UnknownLookup`] for unrecognised values.
    pub fn profile_lookup(&self) -> Result<ProfileLookup, SettingsError> {
        match self.profile_lookup.as_deref() {
            None => Ok(ProfileLookup::default()),
            Some(raw) => ProfileLookup::parse(raw)
                .ok_or_else(|| SettingsError::UnknownLookup(raw.to_owned())),
        }
    }

    /// Listening address.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|_| SettingsError::InvalidBindAddr(raw.to_owned()))
    }

    /// Validate the upstream settings.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] encountered.
    pub fn directory_config(&self) -> Result<DirectoryConfig, SettingsError> {
        let instance_zuid = parse_zuid(self.instance_zuid.as_deref(), "instance_zuid")?;
        let content_model_zuid =
            parse_zuid(self.content_model_zuid.as_deref(), "content_model_zuid")?;
        let developer_token = Zeroizing::new(
            required(self.developer_token.as_deref(), "developer_token")?.to_owned(),
        );
        let accounts_api_url = parse_url(self.accounts_api_url(), "accounts_api_url")?;
        let instance_api_url = parse_url(
            &self
                .instance_api_url()
                .replace(INSTANCE_PLACEHOLDER, instance_zuid.as_str()),
            "instance_api_url",
        )?;
        let dataset_url = parse_url(
            required(self.dataset_url.as_deref(), "dataset_url")?,
            "dataset_url",
        )?;
        let dataset_password = Zeroizing::new(
            required(self.dataset_password.as_deref(), "dataset_password")?.to_owned(),
        );

        Ok(DirectoryConfig {
            instance_zuid,
            content_model_zuid,
            developer_token,
            accounts_api_url,
            instance_api_url,
            dataset_url,
            dataset_password,
            profile_lookup: self.profile_lookup()?,
            request_timeout: positive_secs(self.request_timeout_secs(), "request_timeout_secs")?,
            cache_max_age: Duration::from_secs(self.cache_max_age_secs()),
        })
    }
}
