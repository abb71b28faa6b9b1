//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{MockDirectoryQuery, MockInvitationCommand, MockUserRemovalCommand};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build handler state from mocked driving ports.
///
/// Ports a test does not configure carry no expectations, so any call to
/// them fails the test.
pub fn test_state(
    directory: MockDirectoryQuery,
    invitations: MockInvitationCommand,
    removals: MockUserRemovalCommand,
) -> HttpState {
    HttpState::new(HttpStatePorts {
        directory: Arc::new(directory),
        invitations: Arc::new(invitations),
        removals: Arc::new(removals),
    })
}

/// State whose only configured port is the directory query.
pub fn state_with(directory: MockDirectoryQuery) -> HttpState {
    test_state(
        directory,
        MockInvitationCommand::new(),
        MockUserRemovalCommand::new(),
    )
}

/// State whose only configured port is the invitation command.
pub fn state_with_invitations(invitations: MockInvitationCommand) -> HttpState {
    test_state(
        MockDirectoryQuery::new(),
        invitations,
        MockUserRemovalCommand::new(),
    )
}

/// State whose only configured port is the removal command.
pub fn state_with_removals(removals: MockUserRemovalCommand) -> HttpState {
    test_state(
        MockDirectoryQuery::new(),
        MockInvitationCommand::new(),
        removals,
    )
}
