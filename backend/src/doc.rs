//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api/v1` plus the health
//! probes. The document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump` for the panel's client generator.

use utoipa::OpenApi;

use crate::domain::{
    CompletionStatus, Error, ErrorCode, InstanceUser, LifecycleStep, LocationOption,
    PendingInvite, Role, ShadowProfileRef, StepFailure,
};
use crate::inbound::http::schemas::{
    CancelInviteBody, CleanupOutcomeResponse, InviteBody, InviteOutcomeResponse,
    LocationsEnvelope, PendingInvitesEnvelope, RoleSelector, RolesEnvelope, UsersEnvelope,
};

/// OpenAPI document for the staff admin API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staff admin API",
        description = "Invite, list, cancel, and remove instance users while keeping their staff shadow profiles in step."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::directory::list_users,
        crate::inbound::http::directory::list_roles,
        crate::inbound::http::directory::list_locations,
        crate::inbound::http::directory::list_pending_invites,
        crate::inbound::http::invites::submit_invite,
        crate::inbound::http::invites::cancel_invite,
        crate::inbound::http::users::remove_user_role,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        InstanceUser,
        Role,
        PendingInvite,
        LocationOption,
        ShadowProfileRef,
        StepFailure,
        LifecycleStep,
        CompletionStatus,
        UsersEnvelope,
        RolesEnvelope,
        PendingInvitesEnvelope,
        LocationsEnvelope,
        RoleSelector,
        InviteBody,
        CancelInviteBody,
        InviteOutcomeResponse,
        CleanupOutcomeResponse,
    )),
    tags(
        (name = "directory", description = "Active users, roles, and location options"),
        (name = "invites", description = "Invitation lifecycle"),
        (name = "users", description = "Role revocation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
