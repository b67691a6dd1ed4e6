//! Concurrent execution of resolved actions.
//!
//! All actions of one event are dispatched together and every one is
//! awaited, even after a failure. Outcomes keep dispatch order so the first
//! failure is deterministic. Nothing is rolled back.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::commands::Action;
use crate::config::BotSettings;
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::TeamId;

/// The bot's version, reported by the `version` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a successful action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionSuccess {
    RepoCreated { name: String },
    UserAdded { user: String },
    TeamCreated { team: String },
    TeamUsersInvited { team: String, users: Vec<String> },
    /// `add-team-user` named a team that does not exist. Nothing was changed.
    TeamNotFound { team: String },
    Version { version: String },
    BarrelRoll,
}

/// A failed action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action}: {detail}")]
pub struct ActionFailure {
    /// The action, in command form.
    pub action: String,
    /// The error, including the HTTP status when there is one.
    pub detail: String,
}

impl ActionFailure {
    fn new(action: &Action, detail: impl Into<String>) -> Self {
        ActionFailure {
            action: action.to_string(),
            detail: detail.into(),
        }
    }
}

pub type ExecutionOutcome = Result<ActionSuccess, ActionFailure>;

/// Executes actions against GitHub on behalf of one event.
pub struct ActionExecutor<'a, G> {
    github: &'a G,
    settings: &'a BotSettings,
}

impl<'a, G: GitHubInterpreter> ActionExecutor<'a, G> {
    pub fn new(github: &'a G, settings: &'a BotSettings) -> Self {
        ActionExecutor { github, settings }
    }

    /// Runs every action concurrently and returns the outcomes in dispatch
    /// order, once all of them have settled.
    pub async fn execute_all(&self, actions: &[Action]) -> Vec<ExecutionOutcome> {
        join_all(actions.iter().map(|action| self.execute(action))).await
    }

    /// Runs one action.
    pub async fn execute(&self, action: &Action) -> ExecutionOutcome {
        let outcome = match action {
            Action::CreateRepo { name } => self.create_repo(action, name).await,
            Action::AddUser { user } => self.add_user(action, user).await,
            Action::CreateTeam { team } => self.create_team(action, team).await,
            Action::AddTeamUsers { team, users } => {
                self.add_team_users(action, team, users).await
            }
            Action::Version => Ok(ActionSuccess::Version {
                version: VERSION.to_string(),
            }),
            Action::BarrelRoll => Ok(ActionSuccess::BarrelRoll),
        };

        match &outcome {
            Ok(success) => debug!(%action, ?success, "Action succeeded"),
            Err(failure) => warn!(%action, detail = %failure.detail, "Action failed"),
        }
        outcome
    }

    async fn call(&self, action: &Action, effect: GitHubEffect) -> Result<GitHubResponse, ActionFailure> {
        self.github
            .interpret(effect)
            .await
            .map_err(|e| ActionFailure::new(action, e.to_string()))
    }

    async fn create_repo(&self, action: &Action, name: &str) -> ExecutionOutcome {
        let effect = GitHubEffect::CreateRepository {
            name: name.to_string(),
            team: self.settings.organizers_team_id,
        };
        match self.call(action, effect).await? {
            GitHubResponse::RepositoryCreated { .. } => Ok(ActionSuccess::RepoCreated {
                name: name.to_string(),
            }),
            other => Err(unexpected(action, &other)),
        }
    }

    async fn add_user(&self, action: &Action, user: &str) -> ExecutionOutcome {
        self.add_member(action, self.settings.organizers_team_id, user)
            .await?;
        Ok(ActionSuccess::UserAdded {
            user: user.to_string(),
        })
    }

    async fn create_team(&self, action: &Action, team: &str) -> ExecutionOutcome {
        let effect = GitHubEffect::CreateTeam {
            name: team.to_string(),
        };
        match self.call(action, effect).await? {
            GitHubResponse::TeamCreated(_) => Ok(ActionSuccess::TeamCreated {
                team: team.to_string(),
            }),
            other => Err(unexpected(action, &other)),
        }
    }

    async fn add_team_users(&self, action: &Action, team: &str, users: &[String]) -> ExecutionOutcome {
        let teams = match self.call(action, GitHubEffect::ListTeams).await? {
            GitHubResponse::Teams(teams) => teams,
            other => return Err(unexpected(action, &other)),
        };

        // Slugs are lowercase; users often type the display name's case.
        let Some(found) = teams
            .into_iter()
            .find(|t| t.slug.eq_ignore_ascii_case(team))
        else {
            debug!(team, "Team not found");
            return Ok(ActionSuccess::TeamNotFound {
                team: team.to_string(),
            });
        };

        let results = join_all(
            users
                .iter()
                .map(|user| self.add_member(action, found.id, user)),
        )
        .await;
        results.into_iter().collect::<Result<Vec<()>, _>>()?;

        Ok(ActionSuccess::TeamUsersInvited {
            team: team.to_string(),
            users: users.to_vec(),
        })
    }

    async fn add_member(&self, action: &Action, team: TeamId, user: &str) -> Result<(), ActionFailure> {
        let effect = GitHubEffect::AddTeamMembership {
            team,
            user: user.to_string(),
        };
        match self.call(action, effect).await? {
            GitHubResponse::Membership { .. } => Ok(()),
            other => Err(unexpected(action, &other)),
        }
    }
}

fn unexpected(action: &Action, response: &GitHubResponse) -> ActionFailure {
    ActionFailure::new(action, format!("unexpected response: {:?}", response))
}

/// Collapses settled outcomes: all successes in dispatch order, or the first
/// failure in dispatch order.
pub fn settle(outcomes: Vec<ExecutionOutcome>) -> Result<Vec<ActionSuccess>, ActionFailure> {
    outcomes.into_iter().collect()
}
