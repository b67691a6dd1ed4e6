//! Aggregation of successful outcomes into one report.

use super::executor::ActionSuccess;

/// A side-channel message shown above the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TeamNotFound { team: String },
    Version { version: String },
}

/// Users invited to one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInvite {
    pub team: String,
    pub users: Vec<String>,
}

/// Everything one event achieved, grouped by category.
///
/// Lists keep the order in which actions were dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedReport {
    pub repos: Vec<String>,
    pub added_users: Vec<String>,
    pub new_teams: Vec<String>,
    /// One entry per team; users for the same team are appended.
    pub team_invites: Vec<TeamInvite>,
    pub notices: Vec<Notice>,
    pub barrel_roll: bool,
}

impl AggregatedReport {
    /// Folds settled successes into a report.
    pub fn from_successes(successes: impl IntoIterator<Item = ActionSuccess>) -> Self {
        successes.into_iter().fold(Self::default(), Self::with)
    }

    fn with(mut self, success: ActionSuccess) -> Self {
        match success {
            ActionSuccess::RepoCreated { name } => self.repos.push(name),
            ActionSuccess::UserAdded { user } => self.added_users.push(user),
            ActionSuccess::TeamCreated { team } => self.new_teams.push(team),
            ActionSuccess::TeamUsersInvited { team, users } => {
                match self.team_invites.iter_mut().find(|i| i.team == team) {
                    Some(invite) => invite.users.extend(users),
                    None => self.team_invites.push(TeamInvite { team, users }),
                }
            }
            ActionSuccess::TeamNotFound { team } => {
                self.notices.push(Notice::TeamNotFound { team })
            }
            ActionSuccess::Version { version } => self.notices.push(Notice::Version { version }),
            ActionSuccess::BarrelRoll => self.barrel_roll = true,
        }
        self
    }

    /// Returns true if no category has anything to say.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
