//! Read-side handlers for the user, role, location, and invite tables.
//!
//! ```text
//! GET /api/v1/users?search=jane
//! GET /api/v1/roles
//! GET /api/v1/locations
//! GET /api/v1/invites/pending
//! ```

use actix_web::{get, web};

use crate::domain::visible_users;
use crate::inbound::http::schemas::{
    LocationsEnvelope, PendingInvitesEnvelope, RolesEnvelope, UserSearchQuery, UsersEnvelope,
};
use crate::inbound::http::state::HttpState;

/// List active users, hiding system accounts and applying the search box.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserSearchQuery),
    responses((status = 200, description = "Visible users; data is null when the directory is unavailable", body = UsersEnvelope)),
    tags = ["directory"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserSearchQuery>,
) -> web::Json<UsersEnvelope> {
    let data = state
        .directory
        .instance_users()
        .await
        .map(|users| visible_users(users, query.search.as_deref()));
    web::Json(UsersEnvelope { data })
}

/// List instance roles.
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses((status = 200, description = "Instance roles", body = RolesEnvelope)),
    tags = ["directory"],
    operation_id = "listRoles"
)]
#[get("/roles")]
pub async fn list_roles(state: web::Data<HttpState>) -> web::Json<RolesEnvelope> {
    web::Json(RolesEnvelope {
        data: state.directory.instance_roles().await,
    })
}

/// List location options for the invite form.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses((status = 200, description = "Location options; empty when the dataset is unavailable", body = LocationsEnvelope)),
    tags = ["directory"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> web::Json<LocationsEnvelope> {
    web::Json(LocationsEnvelope {
        data: state.directory.location_options().await,
    })
}

/// List outstanding invitations.
#[utoipa::path(
    get,
    path = "/api/v1/invites/pending",
    responses((status = 200, description = "Pending invites", body = PendingInvitesEnvelope)),
    tags = ["invites"],
    operation_id = "listPendingInvites"
)]
#[get("/invites/pending")]
pub async fn list_pending_invites(
    state: web::Data<HttpState>,
) -> web::Json<PendingInvitesEnvelope> {
    web::Json(PendingInvitesEnvelope {
        data: state.directory.pending_invites().await,
    })
}
