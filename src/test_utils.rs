//! Shared test utilities: a recording GitHub interpreter and arbitrary
//! generators for property-based testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use proptest::prelude::*;

use crate::config::BotSettings;
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse, MembershipState, TeamData};
use crate::github::GitHubApiError;
use crate::types::{CommentId, IssueNumber, RepoId, TeamId};
use crate::webhooks::{InboundEvent, Origin};

pub fn arb_login() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,38}".prop_map(String::from)
}

pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,30}".prop_map(String::from)
}

pub fn test_settings() -> BotSettings {
    BotSettings::default()
}

pub fn test_origin() -> Origin {
    Origin::new(RepoId::new("nodeschool", "organizers"), IssueNumber(7))
}

pub fn comment_event(sender: &str, body: &str) -> InboundEvent {
    InboundEvent {
        sender: sender.to_string(),
        body: Some(body.to_string()),
        origin: test_origin(),
    }
}

type Rule = Arc<dyn Fn(&GitHubEffect) -> bool + Send + Sync>;

/// A [`GitHubInterpreter`] that records every effect and answers from a
/// small in-memory model of one organization.
///
/// Effects are recorded when they complete, so after the caller returns the
/// log shows every call that ran to the end.
#[derive(Clone)]
pub struct RecordingGitHub {
    log: Arc<Mutex<Vec<GitHubEffect>>>,
    membership: MembershipState,
    teams: Vec<TeamData>,
    failures: Vec<(Rule, u16)>,
    delays: Vec<(Rule, Duration)>,
}

impl Default for RecordingGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGitHub {
    /// Every caller is an active member; the organization has a `berlin` team.
    pub fn new() -> Self {
        RecordingGitHub {
            log: Arc::new(Mutex::new(Vec::new())),
            membership: MembershipState::Active,
            teams: vec![TeamData {
                id: TeamId(77),
                slug: "berlin".into(),
                name: "berlin".into(),
            }],
            failures: Vec::new(),
            delays: Vec::new(),
        }
    }

    pub fn with_membership(mut self, state: MembershipState) -> Self {
        self.membership = state;
        self
    }

    pub fn with_teams(mut self, teams: Vec<TeamData>) -> Self {
        self.teams = teams;
        self
    }

    /// Effects matching `rule` fail with `status`.
    pub fn failing_when(
        mut self,
        status: u16,
        rule: impl Fn(&GitHubEffect) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.failures.push((Arc::new(rule), status));
        self
    }

    /// Effects matching `rule` take `delay` before answering.
    pub fn delaying(
        mut self,
        delay: Duration,
        rule: impl Fn(&GitHubEffect) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.delays.push((Arc::new(rule), delay));
        self
    }

    /// All effects completed so far, in completion order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.log.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<GitHubEffect> {
        self.effects()
            .into_iter()
            .filter(GitHubEffect::is_mutation)
            .collect()
    }

    /// Bodies of every comment posted, in order.
    pub fn comments(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                GitHubEffect::PostComment { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    fn respond(&self, effect: &GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
        if let Some((_, status)) = self.failures.iter().find(|(rule, _)| rule(effect)) {
            return Err(GitHubApiError::with_status(*status, "mock failure"));
        }

        let response = match effect {
            GitHubEffect::GetTeamMembership { .. } => GitHubResponse::Membership {
                state: self.membership.clone(),
            },
            GitHubEffect::AddTeamMembership { .. } => GitHubResponse::Membership {
                state: MembershipState::Pending,
            },
            GitHubEffect::CreateRepository { name, .. } => GitHubResponse::RepositoryCreated {
                full_name: format!("nodeschool/{}", name),
            },
            GitHubEffect::CreateTeam { name } => GitHubResponse::TeamCreated(TeamData {
                id: TeamId(1000),
                slug: name.clone(),
                name: name.clone(),
            }),
            GitHubEffect::ListTeams => GitHubResponse::Teams(self.teams.clone()),
            GitHubEffect::PostComment { .. } => GitHubResponse::CommentPosted { id: CommentId(1) },
        };
        Ok(response)
    }
}

impl GitHubInterpreter for RecordingGitHub {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        let delay = self
            .delays
            .iter()
            .find(|(rule, _)| rule(&effect))
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = self.respond(&effect);
        self.log.lock().unwrap().push(effect);
        result
    }
}
