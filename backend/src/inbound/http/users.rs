//! User removal handler.
//!
//! ```text
//! DELETE /api/v1/users/{userZuid}/roles/{roleZuid}?email=jane@x.io&name=Jane%20Roe
//! ```

use actix_web::{delete, web};

use crate::domain::Error;
use crate::domain::ports::RemoveUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CleanupOutcomeResponse, RemoveUserQuery};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_zuid};

/// Revoke a user's role and clean up their shadow profile.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{userZuid}/roles/{roleZuid}",
    params(
        ("userZuid" = String, Path, description = "User identifier"),
        ("roleZuid" = String, Path, description = "Role currently granted"),
        RemoveUserQuery
    ),
    responses(
        (status = 200, description = "Role revoked", body = CleanupOutcomeResponse),
        (status = 400, description = "Malformed identifier or email", body = Error),
        (status = 502, description = "Accounts API rejected the removal", body = Error),
        (status = 503, description = "Accounts API unreachable", body = Error)
    ),
    tags = ["users"],
    operation_id = "removeUserRole"
)]
#[delete("/users/{userZuid}/roles/{roleZuid}")]
pub async fn remove_user_role(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    query: web::Query<RemoveUserQuery>,
) -> ApiResult<web::Json<CleanupOutcomeResponse>> {
    let (user_raw, role_raw) = path.into_inner();
    let user_zuid = parse_zuid(user_raw, FieldName::new("userZuid"))?;
    let role_zuid = parse_zuid(role_raw, FieldName::new("roleZuid"))?;
    let RemoveUserQuery { email, name } = query.into_inner();
    let outcome = state
        .removals
        .remove_user(RemoveUserRequest {
            user_zuid,
            role_zuid,
            email,
            name,
        })
        .await?;
    Ok(web::Json(outcome.into()))
}
