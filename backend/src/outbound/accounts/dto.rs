//! Wire shapes for the accounts API.
//!
//! List endpoints wrap their rows as `{ "data": [...], "_meta": {...} }`;
//! `_meta` is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InstanceUser, InviteDraft, PendingInvite, Role, Zuid};

#[derive(Debug, Deserialize)]
pub(super) struct ListEnvelopeDto<T> {
    pub(super) data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleDto {
    #[serde(rename = "ZUID")]
    pub(super) zuid: String,
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InstanceUserDto {
    #[serde(rename = "ZUID")]
    pub(super) zuid: String,
    #[serde(default)]
    pub(super) first_name: Option<String>,
    #[serde(default)]
    pub(super) last_name: Option<String>,
    pub(super) email: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) role: RoleDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PendingInviteDto {
    #[serde(rename = "inviteZUID")]
    pub(super) invite_zuid: String,
    #[serde(default)]
    pub(super) name: String,
    pub(super) email: String,
}

/// Body of `POST /invites`. `locations` serialises as `null` when empty.
#[derive(Debug, Serialize)]
pub(super) struct InvitePayloadDto<'a> {
    #[serde(rename = "accessLevel")]
    pub(super) access_level: u8,
    #[serde(rename = "entityZUID")]
    pub(super) entity_zuid: &'a str,
    #[serde(rename = "inviteeEmail")]
    pub(super) invitee_email: &'a str,
    #[serde(rename = "inviteeName")]
    pub(super) invitee_name: &'a str,
    pub(super) locations: Option<String>,
}

impl<'a> InvitePayloadDto<'a> {
    pub(super) fn new(instance_zuid: &'a Zuid, draft: &'a InviteDraft) -> Self {
        Self {
            access_level: draft.access_level().as_u8(),
            entity_zuid: instance_zuid.as_str(),
            invitee_email: draft.email().as_str(),
            invitee_name: draft.name(),
            locations: draft.locations().to_payload(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct InviteCreatedDto {
    #[serde(default)]
    pub(super) data: Option<InviteCreatedDataDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InviteCreatedDataDto {
    #[serde(rename = "ZUID", alias = "inviteZUID", default)]
    pub(super) zuid: Option<String>,
}

impl InviteCreatedDto {
    /// Invite identifier, when the body carried a usable one.
    pub(super) fn invite_zuid(self) -> Option<Zuid> {
        self.data
            .and_then(|data| data.zuid)
            .and_then(|zuid| Zuid::new(zuid).ok())
    }
}

fn zuid(raw: String, what: &str) -> Result<Zuid, String> {
    Zuid::new(raw.clone()).map_err(|error| format!("{what} `{raw}` is not a valid ZUID: {error}"))
}

impl RoleDto {
    pub(super) fn into_domain(self) -> Result<Role, String> {
        Ok(Role {
            zuid: zuid(self.zuid, "role")?,
            name: self.name,
        })
    }
}

impl InstanceUserDto {
    pub(super) fn into_domain(self) -> Result<InstanceUser, String> {
        Ok(InstanceUser {
            zuid: zuid(self.zuid, "user")?,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email,
            role: self.role.into_domain()?,
            created_at: self.created_at,
        })
    }
}

impl PendingInviteDto {
    pub(super) fn into_domain(self) -> Result<PendingInvite, String> {
        Ok(PendingInvite {
            invite_zuid: zuid(self.invite_zuid, "invite")?,
            name: self.name,
            email: self.email,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Decoding and payload shape checks against recorded accounts responses.
    use super::*;
    use crate::domain::{AccessLevel, LocationSet};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_users_envelope_ignoring_unused_fields() {
        let body = json!({
            "data": [{
                "ID": 12,
                "ZUID": "5-84d1e6d4ae-s3m974",
                "authSource": null,
                "createdAt": "2023-02-01T10:00:00Z",
                "email": "jane@x.io",
                "firstName": "Jane",
                "lastName": null,
                "staff": false,
                "role": {
                    "ZUID": "30-86f8ccec82-swp72s",
                    "name": "Contributor",
                    "static": true,
                    "systemRoleZUID": "31-71cfc74-0wn3r"
                }
            }],
            "_meta": { "limit": 0, "offset": 0, "start": 0, "totalResults": 1 }
        });
        let envelope: ListEnvelopeDto<InstanceUserDto> =
            serde_json::from_value(body).expect("envelope decodes");
        let users = envelope
            .data
            .into_iter()
            .map(InstanceUserDto::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .expect("rows map");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].first_name, "Jane");
        assert_eq!(users[0].last_name, "");
        assert_eq!(users[0].role.name, "Contributor");
    }

    #[rstest]
    fn rejects_rows_with_unusable_identifiers() {
        let row = PendingInviteDto {
            invite_zuid: "bad/zuid".to_owned(),
            name: "Jane Roe".to_owned(),
            email: "jane@x.io".to_owned(),
        };
        let error = row.into_domain().expect_err("slash is not allowed");
        assert!(error.contains("invite `bad/zuid`"));
    }

    #[rstest]
    #[case::with_locations(vec!["loc-1", "loc-2"], json!("loc-1,loc-2"))]
    #[case::without_locations(Vec::new(), serde_json::Value::Null)]
    fn invite_payload_matches_accounts_contract(
        #[case] locations: Vec<&str>,
        #[case] expected_locations: serde_json::Value,
    ) {
        let instance = Zuid::new("8-instance").expect("fixture zuid");
        let draft = InviteDraft::try_from_parts(
            "Jane Roe",
            "jane@x.io",
            AccessLevel::Contributor,
            LocationSet::new(locations).expect("valid locations"),
        )
        .expect("valid draft");

        let payload = serde_json::to_value(InvitePayloadDto::new(&instance, &draft))
            .expect("payload serialises");

        assert_eq!(
            payload,
            json!({
                "accessLevel": 6,
                "entityZUID": "8-instance",
                "inviteeEmail": "jane@x.io",
                "inviteeName": "Jane Roe",
                "locations": expected_locations,
            })
        );
    }

    #[rstest]
    #[case(json!({ "data": { "ZUID": "10-abc" } }), Some("10-abc"))]
    #[case(json!({ "data": { "inviteZUID": "10-def" } }), Some("10-def"))]
    #[case(json!({ "data": {} }), None)]
    #[case(json!({}), None)]
    fn created_invite_identifier_is_optional(
        #[case] body: serde_json::Value,
        #[case] expected: Option<&str>,
    ) {
        let dto: InviteCreatedDto = serde_json::from_value(body).expect("decodes");
        assert_eq!(
            dto.invite_zuid().as_ref().map(Zuid::as_str),
            expected
        );
    }
}
