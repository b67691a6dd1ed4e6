//! GitHub effect interpreter using octocrab.
//!
//! This module implements the `GitHubInterpreter` trait, executing GitHub
//! effects against the real GitHub API via octocrab.
//!
//! Key implementation details:
//! - Team memberships use the numeric `/teams/{id}` endpoints
//! - Team listing follows pagination at the maximum page size, so large
//!   organizations are never truncated
//! - User-supplied names are URL-encoded before they go into a path

use serde::{Deserialize, Serialize};

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse, MembershipState, TeamData};
use crate::types::{CommentId, TeamId};
use crate::webhooks::Origin;

use super::client::OctocrabClient;
use super::error::GitHubApiError;

/// Largest page size the GitHub REST API accepts.
const MAX_PER_PAGE: u8 = 100;

// ─── Interpreter Implementation ───────────────────────────────────────────────

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        interpret_github_effect(self, effect).await
    }
}

/// Interprets a GitHub effect, executing it against the GitHub API.
///
/// Each effect is executed exactly once; failures are returned to the
/// caller, never retried.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    tracing::debug!(?effect, org = client.org(), "Executing GitHub effect");

    match effect {
        GitHubEffect::GetTeamMembership { team, user } => {
            get_team_membership(client, team, &user).await
        }
        GitHubEffect::AddTeamMembership { team, user } => {
            add_team_membership(client, team, &user).await
        }
        GitHubEffect::CreateRepository { name, team } => {
            create_repository(client, &name, team).await
        }
        GitHubEffect::CreateTeam { name } => create_team(client, &name).await,
        GitHubEffect::ListTeams => list_teams(client).await,
        GitHubEffect::PostComment { origin, body } => post_comment(client, origin, body).await,
    }
}

// ─── Team Memberships ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MembershipResponse {
    state: MembershipState,
}

fn membership_url(team: TeamId, user: &str) -> String {
    format!(
        "/teams/{}/memberships/{}",
        team,
        urlencoding::encode(user)
    )
}

async fn get_team_membership(
    client: &OctocrabClient,
    team: TeamId,
    user: &str,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = membership_url(team, user);

    let result: Result<MembershipResponse, _> = client.inner().get(&url, None::<&()>).await;

    match result {
        Ok(membership) => Ok(GitHubResponse::Membership {
            state: membership.state,
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn add_team_membership(
    client: &OctocrabClient,
    team: TeamId,
    user: &str,
) -> Result<GitHubResponse, GitHubApiError> {
    #[derive(Serialize)]
    struct MembershipRequest {
        role: &'static str,
    }

    let url = membership_url(team, user);
    let request = MembershipRequest { role: "member" };

    let result: Result<MembershipResponse, _> = client.inner().put(&url, Some(&request)).await;

    match result {
        Ok(membership) => Ok(GitHubResponse::Membership {
            state: membership.state,
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

// ─── Organization ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreateRepositoryRequest<'a> {
    name: &'a str,
    description: String,
    homepage: String,
    private: bool,
    has_issues: bool,
    has_wiki: bool,
    has_downloads: bool,
    team_id: TeamId,
    auto_init: bool,
}

impl<'a> CreateRepositoryRequest<'a> {
    fn new(org: &str, name: &'a str, team: TeamId) -> Self {
        CreateRepositoryRequest {
            name,
            description: format!("Repo for organizing the {} nodeschools", name),
            homepage: format!("https://{}.github.io/{}", org, name),
            private: false,
            has_issues: true,
            has_wiki: false,
            has_downloads: false,
            team_id: team,
            auto_init: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    full_name: String,
}

async fn create_repository(
    client: &OctocrabClient,
    name: &str,
    team: TeamId,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = format!("/orgs/{}/repos", client.org());
    let request = CreateRepositoryRequest::new(client.org(), name, team);

    let result: Result<RepositoryResponse, _> = client.inner().post(&url, Some(&request)).await;

    match result {
        Ok(repo) => Ok(GitHubResponse::RepositoryCreated {
            full_name: repo.full_name,
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

#[derive(Debug, Serialize)]
struct CreateTeamRequest<'a> {
    name: &'a str,
    description: String,
    repo_names: Vec<String>,
    /// GitHub calls visible teams "closed".
    privacy: &'static str,
}

impl<'a> CreateTeamRequest<'a> {
    fn new(org: &str, name: &'a str) -> Self {
        CreateTeamRequest {
            name,
            description: format!("Team for organizing the {} nodeschools", name),
            repo_names: vec![format!("{}/{}", org, name)],
            privacy: "closed",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamResponse {
    id: u64,
    slug: String,
    name: String,
}

impl From<TeamResponse> for TeamData {
    fn from(team: TeamResponse) -> Self {
        TeamData {
            id: TeamId(team.id),
            slug: team.slug,
            name: team.name,
        }
    }
}

async fn create_team(client: &OctocrabClient, name: &str) -> Result<GitHubResponse, GitHubApiError> {
    let url = format!("/orgs/{}/teams", client.org());
    let request = CreateTeamRequest::new(client.org(), name);

    let result: Result<TeamResponse, _> = client.inner().post(&url, Some(&request)).await;

    match result {
        Ok(team) => Ok(GitHubResponse::TeamCreated(team.into())),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn list_teams(client: &OctocrabClient) -> Result<GitHubResponse, GitHubApiError> {
    #[derive(Serialize)]
    struct PageParams {
        per_page: u8,
        page: u32,
    }

    let url = format!("/orgs/{}/teams", client.org());
    let mut page = 1u32;
    let mut all_teams = Vec::new();

    loop {
        let params = PageParams {
            per_page: MAX_PER_PAGE,
            page,
        };

        let result: Result<Vec<TeamResponse>, _> = client.inner().get(&url, Some(&params)).await;

        match result {
            Ok(items) => {
                let is_last_page = items.len() < usize::from(MAX_PER_PAGE);
                all_teams.extend(items.into_iter().map(TeamData::from));

                if is_last_page {
                    break;
                }
                page += 1;
            }
            Err(e) => return Err(GitHubApiError::from_octocrab(e)),
        }
    }

    tracing::debug!(teams = all_teams.len(), pages = page, "Listed organization teams");
    Ok(GitHubResponse::Teams(all_teams))
}

// ─── Comments ─────────────────────────────────────────────────────────────────

async fn post_comment(
    client: &OctocrabClient,
    origin: Origin,
    body: String,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(&origin.repo.owner, &origin.repo.repo)
        .create_comment(origin.issue.0, body)
        .await;

    match result {
        Ok(comment) => Ok(GitHubResponse::CommentPosted {
            id: CommentId(comment.id.into_inner()),
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}
