//! Sender authorization.
//!
//! Only active members of the organizer team may command the bot. A pending
//! invitation is not enough.

use thiserror::Error;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse, MembershipState};
use crate::types::TeamId;

/// Why a sender was not authorized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("membership is {0:?}, not active")]
    NotActive(MembershipState),

    #[error("membership lookup failed: {0}")]
    Lookup(String),

    #[error("unexpected response to membership lookup: {0:?}")]
    UnexpectedResponse(GitHubResponse),
}

/// Returns true if `sender` is the bot itself.
///
/// GitHub logins are case-insensitive.
pub fn is_own_comment(sender: &str, handle: &str) -> bool {
    sender.eq_ignore_ascii_case(handle)
}

/// Checks that `user` is an active member of `team`.
pub async fn authorize<G: GitHubInterpreter>(
    github: &G,
    team: TeamId,
    user: &str,
) -> Result<(), AuthorizationError> {
    let effect = GitHubEffect::GetTeamMembership {
        team,
        user: user.to_string(),
    };

    match github.interpret(effect).await {
        Ok(GitHubResponse::Membership {
            state: MembershipState::Active,
        }) => Ok(()),
        Ok(GitHubResponse::Membership { state }) => Err(AuthorizationError::NotActive(state)),
        Ok(other) => Err(AuthorizationError::UnexpectedResponse(other)),
        Err(e) => Err(AuthorizationError::Lookup(e.to_string())),
    }
}
