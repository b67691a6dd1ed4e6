//! GitHub API effect types.
//!
//! These types describe GitHub API operations as data, without executing
//! them. The interpreter executes these effects against the actual GitHub
//! API; tests use a recording interpreter instead.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, TeamId};
use crate::webhooks::Origin;

/// A GitHub API effect.
///
/// Effects are organization-scoped: the interpreter is constructed with the
/// organization name, so effects don't include it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Team Memberships ─────────────────────────────────────────────────────
    /// Read a user's membership in a team.
    GetTeamMembership { team: TeamId, user: String },

    /// Add a user to a team (inviting them to the organization if needed).
    AddTeamMembership { team: TeamId, user: String },

    // ─── Organization ─────────────────────────────────────────────────────────
    /// Create a public repository in the organization.
    ///
    /// `team` is granted access to the new repository.
    CreateRepository { name: String, team: TeamId },

    /// Create a team in the organization, with access to the repository of
    /// the same name.
    CreateTeam { name: String },

    /// List every team in the organization (all pages).
    ListTeams,

    // ─── Comments ─────────────────────────────────────────────────────────────
    /// Post a new comment on an issue or pull request.
    PostComment { origin: Origin, body: String },
}

impl GitHubEffect {
    /// Returns true if the effect changes state on GitHub.
    pub fn is_mutation(&self) -> bool {
        match self {
            GitHubEffect::GetTeamMembership { .. } | GitHubEffect::ListTeams => false,
            GitHubEffect::AddTeamMembership { .. }
            | GitHubEffect::CreateRepository { .. }
            | GitHubEffect::CreateTeam { .. }
            | GitHubEffect::PostComment { .. } => true,
        }
    }
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// State of a team membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    /// The user is a member.
    Active,
    /// The user has been invited but has not accepted.
    Pending,
    /// Any state GitHub may add in the future.
    #[serde(other)]
    Unknown,
}

/// Team data returned from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamData {
    /// The numeric team ID.
    pub id: TeamId,
    /// The URL-safe team name.
    pub slug: String,
    /// The display name.
    pub name: String,
}

/// Response from a GitHub effect.
///
/// Each variant corresponds to the response from a particular effect type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `GetTeamMembership` and `AddTeamMembership`.
    Membership { state: MembershipState },

    /// Response to `CreateRepository`.
    RepositoryCreated { full_name: String },

    /// Response to `CreateTeam`.
    TeamCreated(TeamData),

    /// Response to `ListTeams`.
    Teams(Vec<TeamData>),

    /// Response to `PostComment`.
    CommentPosted { id: CommentId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueNumber, RepoId};

    #[test]
    fn membership_state_deserializes_known_and_unknown() {
        let active: MembershipState = serde_json::from_str("\"active\"").unwrap();
        let pending: MembershipState = serde_json::from_str("\"pending\"").unwrap();
        let other: MembershipState = serde_json::from_str("\"suspended\"").unwrap();

        assert_eq!(active, MembershipState::Active);
        assert_eq!(pending, MembershipState::Pending);
        assert_eq!(other, MembershipState::Unknown);
    }

    #[test]
    fn reads_are_not_mutations() {
        assert!(
            !GitHubEffect::GetTeamMembership {
                team: TeamId(1),
                user: "jane".into()
            }
            .is_mutation()
        );
        assert!(!GitHubEffect::ListTeams.is_mutation());
        assert!(
            GitHubEffect::AddTeamMembership {
                team: TeamId(1),
                user: "jane".into()
            }
            .is_mutation()
        );
        assert!(
            GitHubEffect::PostComment {
                origin: Origin::new(RepoId::new("o", "r"), IssueNumber(1)),
                body: "hi".into()
            }
            .is_mutation()
        );
    }

    #[test]
    fn effect_serializes_with_type_tag() {
        let effect = GitHubEffect::CreateRepository {
            name: "nyc".into(),
            team: TeamId(1660004),
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["type"], "create_repository");
        assert_eq!(json["name"], "nyc");
        assert_eq!(json["team"], 1660004);
    }
}
