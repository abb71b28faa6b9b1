//! Domain primitives, the invitation lifecycle, and its services.
//!
//! Purpose: model the instance directory (users, roles, pending invites,
//! locations), invitation drafts and their stage machine, shadow profiles,
//! and the typed outcomes returned by lifecycle commands. Transport and
//! upstream details stay behind the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - CommandOutcome: complete or partial result of a lifecycle command.
//! - DirectoryQueryService, InvitationLifecycleService, UserRemovalService:
//!   implementations of the driving ports.

pub mod directory;
pub mod error;
pub mod invitation;
pub mod invitation_stage;
pub mod outcome;
pub mod ports;
pub mod read_state;
pub mod shadow_profile;
pub mod trace_id;

mod directory_query_service;
mod invitation_service;
mod lifecycle_support;
mod profile_cleanup;
mod removal_service;

pub use self::directory::{
    InstanceUser, LocationOption, PendingInvite, Role, SYSTEM_USER_PREFIX, Zuid,
    ZuidValidationError, visible_users,
};
pub use self::directory_query_service::DirectoryQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::invitation::{
    AccessLevel, EmailAddress, InviteDraft, InviteValidationError, LocationSet,
};
pub use self::invitation_service::InvitationLifecycleService;
pub use self::invitation_stage::{InvalidTransition, InvitationEvent, InvitationStage};
pub use self::outcome::{
    CleanupReport, CommandOutcome, CompletionStatus, InviteReceipt, LifecycleStep, StepFailure,
};
pub use self::profile_cleanup::ShadowProfileCleanup;
pub use self::read_state::{ReadStateCache, ReadStateKey};
pub use self::removal_service::UserRemovalService;
pub use self::shadow_profile::{
    ProfileLookup, PublishVersion, ShadowProfileDraft, ShadowProfileRef, composite_search_key,
    latest_publish_version,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use staff_admin::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such invite"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
