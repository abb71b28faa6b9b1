//! Typed outcomes for lifecycle commands.
//!
//! A command whose primary directory mutation failed returns a domain
//! [`Error`](crate::domain::Error). Once the primary mutation succeeded the
//! command always returns an outcome; follow-up failures (profile linking or
//! cleanup) are listed as [`StepFailure`]s and make the outcome partial.

use serde::Serialize;
use utoipa::ToSchema;

use super::ShadowProfileRef;

/// Dependent step that can fail after the primary directory mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStep {
    /// Shadow profile creation after a 201.
    LinkShadowProfile,
    /// Finding shadow profiles for cleanup.
    LocateShadowProfile,
    /// Removing the latest publish version.
    UnpublishShadowProfile,
    /// Deleting the shadow profile item.
    DeleteShadowProfile,
}

/// A dependent step that failed after the primary mutation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepFailure {
    /// Step that failed.
    pub step: LifecycleStep,
    /// Profile the step was acting on, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ShadowProfileRef>,
    /// Adapter failure message.
    pub message: String,
}

impl StepFailure {
    /// Failure not tied to a particular profile.
    pub fn new(step: LifecycleStep, message: impl Into<String>) -> Self {
        Self {
            step,
            target: None,
            message: message.into(),
        }
    }

    /// Failure while acting on `target`.
    pub fn for_target(
        step: LifecycleStep,
        target: &ShadowProfileRef,
        message: impl Into<String>,
    ) -> Self {
        Self {
            step,
            target: Some(target.clone()),
            message: message.into(),
        }
    }
}

/// Whether every step of a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// All steps succeeded.
    Complete,
    /// The primary mutation succeeded; at least one follow-up step failed.
    Partial,
}

/// Result of a command whose primary mutation succeeded.
///
/// # Examples
/// ```
/// use staff_admin::domain::{CommandOutcome, CompletionStatus, LifecycleStep, StepFailure};
///
/// let mut outcome = CommandOutcome::new("5-user");
/// assert_eq!(outcome.status(), CompletionStatus::Complete);
/// outcome.record(StepFailure::new(LifecycleStep::LocateShadowProfile, "dataset down"));
/// assert_eq!(outcome.status(), CompletionStatus::Partial);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome<T> {
    value: T,
    failures: Vec<StepFailure>,
}

impl<T> CommandOutcome<T> {
    /// Outcome with no failures yet.
    pub fn new(value: T) -> Self {
        Self {
            value,
            failures: Vec::new(),
        }
    }

    /// Record a follow-up failure.
    pub fn record(&mut self, failure: StepFailure) {
        self.failures.push(failure);
    }

    /// Record several follow-up failures.
    pub fn extend(&mut self, failures: impl IntoIterator<Item = StepFailure>) {
        self.failures.extend(failures);
    }

    /// Completion status derived from recorded failures.
    pub fn status(&self) -> CompletionStatus {
        if self.failures.is_empty() {
            CompletionStatus::Complete
        } else {
            CompletionStatus::Partial
        }
    }

    /// Borrow the command's value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[StepFailure] {
        &self.failures
    }

    /// Split into value and failures.
    pub fn into_parts(self) -> (T, Vec<StepFailure>) {
        (self.value, self.failures)
    }
}

/// What a successful invite submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteReceipt {
    /// Invite identifier when the directory returned one.
    pub invite_zuid: Option<super::Zuid>,
    /// Linked shadow profile when creation succeeded.
    pub shadow_profile: Option<ShadowProfileRef>,
}

/// Profiles removed by a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Profiles deleted.
    pub deleted: Vec<ShadowProfileRef>,
}
