//! Shared reqwest plumbing for the upstream adapters.
//!
//! Adapters differ only in which port error they produce, so status and
//! transport mapping is written once against [`UpstreamError`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityDirectoryError, LocationCatalogueError, ShadowProfileStoreError};

const USER_AGENT: &str = concat!("staff-admin/", env!("CARGO_PKG_VERSION"));

/// Constructors every upstream port error provides.
pub(crate) trait UpstreamError: Sized {
    fn transport(message: String) -> Self;
    fn timeout(message: String) -> Self;
    fn rejected(status: u16, message: String) -> Self;
    fn decode(message: String) -> Self;
}

macro_rules! impl_upstream_error {
    ($error:ty, timeout = $timeout:ident) => {
        impl UpstreamError for $error {
            fn transport(message: String) -> Self {
                <$error>::transport(message)
            }
            fn timeout(message: String) -> Self {
                <$error>::$timeout(message)
            }
            fn rejected(status: u16, message: String) -> Self {
                <$error>::rejected(status, message)
            }
            fn decode(message: String) -> Self {
                <$error>::decode(message)
            }
        }
    };
}

impl_upstream_error!(IdentityDirectoryError, timeout = timeout);
impl_upstream_error!(ShadowProfileStoreError, timeout = timeout);
// The dataset port has no timeout variant; a slow dataset is a transport failure.
impl_upstream_error!(LocationCatalogueError, timeout = transport);

/// Build a client with the configured per-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Attach the bearer credential.
pub(crate) fn bearer(request: RequestBuilder, token: &Zeroizing<String>) -> RequestBuilder {
    request.bearer_auth(token.as_str())
}

/// Append path segments to `base`, percent-encoding each one.
///
/// An empty final segment produces a trailing slash.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) fn map_transport_error<E: UpstreamError>(error: reqwest::Error) -> E {
    if error.is_timeout() {
        E::timeout(error.to_string())
    } else if error.is_decode() {
        E::decode(error.to_string())
    } else {
        E::transport(error.to_string())
    }
}

pub(crate) fn map_status_error<E: UpstreamError>(status: StatusCode, body: &[u8]) -> E {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => E::timeout(message),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => E::transport(message),
        _ => E::rejected(status.as_u16(), message),
    }
}

/// Send `request` and return the status with the raw body.
pub(crate) async fn send<E: UpstreamError>(
    request: RequestBuilder,
) -> Result<(StatusCode, Vec<u8>), E> {
    let response = request.send().await.map_err(map_transport_error::<E>)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error::<E>)?;
    Ok((status, body.to_vec()))
}

/// Send `request`, require a 2xx, and decode the JSON body.
pub(crate) async fn fetch_json<T, E>(request: RequestBuilder, what: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: UpstreamError,
{
    let (status, body) = send::<E>(request).await?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    decode_json(&body, what)
}

/// Send `request` and accept exactly `expected`.
pub(crate) async fn expect_status<E: UpstreamError>(
    request: RequestBuilder,
    expected: StatusCode,
) -> Result<(), E> {
    let (status, body) = send::<E>(request).await?;
    if status == expected {
        Ok(())
    } else {
        Err(map_status_error(status, &body))
    }
}

pub(crate) fn decode_json<T: DeserializeOwned, E: UpstreamError>(
    body: &[u8],
    what: &str,
) -> Result<T, E> {
    serde_json::from_slice(body)
        .map_err(|error| E::decode(format!("invalid {what} payload: {error}")))
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
