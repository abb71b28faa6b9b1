//! Reqwest-backed accounts API adapter.
//!
//! This adapter owns transport details only: URLs, the bearer header, the
//! list envelope, and which statuses count as success for each call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{
    InstanceUserDto, InviteCreatedDto, InvitePayloadDto, ListEnvelopeDto, PendingInviteDto,
    RoleDto,
};
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError, InviteSubmission};
use crate::domain::{InstanceUser, InviteDraft, PendingInvite, Role, Zuid};
use crate::outbound::http_support::{
    bearer, build_client, decode_json, endpoint, expect_status, fetch_json, map_status_error,
    send,
};

/// Identity directory adapter for one instance.
pub struct AccountsHttpDirectory {
    client: Client,
    base_url: Url,
    instance_zuid: Zuid,
    token: Zeroizing<String>,
}

impl AccountsHttpDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        instance_zuid: Zuid,
        token: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            instance_zuid,
            token,
        })
    }

    fn instance_url(&self, tail: &[&str]) -> Url {
        let mut segments = vec!["instances", self.instance_zuid.as_str()];
        segments.extend_from_slice(tail);
        endpoint(&self.base_url, &segments)
    }

    async fn list<T, D>(
        &self,
        url: Url,
        what: &str,
        map: fn(D) -> Result<T, String>,
    ) -> Result<Vec<T>, IdentityDirectoryError>
    where
        D: serde::de::DeserializeOwned,
    {
        let request = bearer(self.client.get(url), &self.token);
        let envelope: ListEnvelopeDto<D> =
            fetch_json::<_, IdentityDirectoryError>(request, what).await?;
        envelope
            .data
            .into_iter()
            .map(map)
            .collect::<Result<Vec<_>, _>>()
            .map_err(IdentityDirectoryError::decode)
    }
}

#[async_trait]
impl IdentityDirectory for AccountsHttpDirectory {
    async fn list_instance_users(&self) -> Result<Vec<InstanceUser>, IdentityDirectoryError> {
        let url = self.instance_url(&["users", "roles"]);
        self.list(url, "instance users", InstanceUserDto::into_domain)
            .await
    }

    async fn list_instance_roles(&self) -> Result<Vec<Role>, IdentityDirectoryError> {
        let url = self.instance_url(&["roles"]);
        self.list(url, "instance roles", RoleDto::into_domain).await
    }

    async fn list_pending_invites(&self) -> Result<Vec<PendingInvite>, IdentityDirectoryError> {
        let url = self.instance_url(&["users", "pending"]);
        self.list(url, "pending invites", PendingInviteDto::into_domain)
            .await
    }

    async fn create_invite(
        &self,
        draft: &InviteDraft,
    ) -> Result<InviteSubmission, IdentityDirectoryError> {
        let url = endpoint(&self.base_url, &["invites"]);
        let payload = InvitePayloadDto::new(&self.instance_zuid, draft);
        let request = bearer(self.client.post(url), &self.token).json(&payload);
        let (status, body) = send::<IdentityDirectoryError>(request).await?;

        match status {
            StatusCode::CREATED => {
                let invite_zuid = decode_json::<InviteCreatedDto, IdentityDirectoryError>(
                    &body,
                    "invite creation",
                )
                .map(InviteCreatedDto::invite_zuid)
                .unwrap_or_else(|error| {
                    debug!(%error, "invite created without a readable identifier");
                    None
                });
                Ok(InviteSubmission::Created { invite_zuid })
            }
            _ if status.is_success() => Ok(InviteSubmission::Accepted {
                status: status.as_u16(),
            }),
            _ => Err(map_status_error(status, &body)),
        }
    }

    async fn cancel_invite(&self, invite_zuid: &Zuid) -> Result<(), IdentityDirectoryError> {
        let mut url = endpoint(&self.base_url, &["invites", invite_zuid.as_str()]);
        url.query_pairs_mut().append_pair("action", "cancel");
        let request = bearer(self.client.put(url), &self.token).json(&serde_json::json!({}));
        expect_status(request, StatusCode::OK).await
    }

    async fn revoke_role(
        &self,
        user_zuid: &Zuid,
        role_zuid: &Zuid,
    ) -> Result<(), IdentityDirectoryError> {
        let url = endpoint(
            &self.base_url,
            &["users", user_zuid.as_str(), "roles", role_zuid.as_str()],
        );
        let request = bearer(self.client.delete(url), &self.token);
        expect_status(request, StatusCode::OK).await
    }
}
