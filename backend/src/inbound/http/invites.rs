//! Invitation command handlers.
//!
//! ```text
//! POST /api/v1/invites
//! PUT  /api/v1/invites/{inviteZuid}/cancel
//! ```
//!
//! Both answer `200` once the directory accepted the primary mutation; the
//! body says whether the shadow profile follow-up steps completed.

use actix_web::{post, put, web};

use crate::domain::Error;
use crate::domain::ports::{CancelInviteRequest, SubmitInviteRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CancelInviteBody, CleanupOutcomeResponse, InviteBody, InviteOutcomeResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_zuid};

impl From<InviteBody> for SubmitInviteRequest {
    fn from(body: InviteBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            role: body.role.into_selector(),
            locations: body.locations,
        }
    }
}

/// Invite a user and create their shadow profile.
#[utoipa::path(
    post,
    path = "/api/v1/invites",
    request_body = InviteBody,
    responses(
        (status = 200, description = "Invite accepted", body = InviteOutcomeResponse),
        (status = 400, description = "Form failed validation", body = Error),
        (status = 502, description = "Accounts API rejected the invite", body = Error),
        (status = 503, description = "Accounts API unreachable", body = Error)
    ),
    tags = ["invites"],
    operation_id = "submitInvite"
)]
#[post("/invites")]
pub async fn submit_invite(
    state: web::Data<HttpState>,
    payload: web::Json<InviteBody>,
) -> ApiResult<web::Json<InviteOutcomeResponse>> {
    let outcome = state
        .invitations
        .submit_invite(payload.into_inner().into())
        .await?;
    Ok(web::Json(outcome.into()))
}

/// Cancel a pending invite and clean up its shadow profile.
#[utoipa::path(
    put,
    path = "/api/v1/invites/{inviteZuid}/cancel",
    params(("inviteZuid" = String, Path, description = "Pending invite identifier")),
    request_body = CancelInviteBody,
    responses(
        (status = 200, description = "Invite cancelled", body = CleanupOutcomeResponse),
        (status = 400, description = "Malformed identifier or email", body = Error),
        (status = 502, description = "Accounts API rejected the cancellation", body = Error),
        (status = 503, description = "Accounts API unreachable", body = Error)
    ),
    tags = ["invites"],
    operation_id = "cancelInvite"
)]
#[put("/invites/{inviteZuid}/cancel")]
pub async fn cancel_invite(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CancelInviteBody>,
) -> ApiResult<web::Json<CleanupOutcomeResponse>> {
    let invite_zuid = parse_zuid(path.into_inner(), FieldName::new("inviteZuid"))?;
    let CancelInviteBody { name, email } = payload.into_inner();
    let outcome = state
        .invitations
        .cancel_invite(CancelInviteRequest {
            invite_zuid,
            name,
            email,
        })
        .await?;
    Ok(web::Json(outcome.into()))
}
