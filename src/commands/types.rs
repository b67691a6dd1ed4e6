//! Command types for `@nodeschoolbot` mentions.
//!
//! A [`Command`] is the raw, untyped shape of one mention line. An
//! [`Action`] is what the bot will actually do for it, after checking the
//! command name and argument count.

use serde::{Deserialize, Serialize};

/// Name of the easter-egg command produced by the barrel-roll trigger.
pub const BARREL_ROLL: &str = "barrel-roll";

/// One command parsed from a mention line: `@bot {name} {args...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The easter-egg command.
    pub fn barrel_roll() -> Self {
        Command {
            name: BARREL_ROLL.to_string(),
            args: Vec::new(),
        }
    }
}

/// Result of scanning a comment for commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommands {
    /// There was no comment text at all.
    NoText,

    /// There was text, but no line addressed the bot.
    NoneRecognized,

    /// One command per mention line, in textual order. Never empty.
    Commands(Vec<Command>),
}

impl ParsedCommands {
    /// Returns the commands, or an empty slice when nothing was found.
    pub fn commands(&self) -> &[Command] {
        match self {
            ParsedCommands::Commands(cmds) => cmds,
            ParsedCommands::NoText | ParsedCommands::NoneRecognized => &[],
        }
    }
}

/// A resolved operation the bot performs for a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// `create-repo {name}`: create a repository in the organization.
    CreateRepo { name: String },

    /// `add-user {username}`: add a user to the organizer team.
    AddUser { user: String },

    /// `create-team {team}`: create a team in the organization.
    CreateTeam { team: String },

    /// `add-team-user {team} {username...}`: add users to an existing team.
    AddTeamUsers { team: String, users: Vec<String> },

    /// `version`: report the bot version.
    Version,

    /// The barrel-roll easter egg.
    BarrelRoll,
}

impl Action {
    /// Resolves a command to an action.
    ///
    /// Returns `None` for `help`, unknown or empty names, and commands with
    /// too few arguments for their kind. Extra arguments are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodeschool_bot::commands::{Action, Command};
    ///
    /// let cmd = Command::new("add-user", ["@jane"]);
    /// assert_eq!(Action::resolve(&cmd), Some(Action::AddUser { user: "jane".into() }));
    ///
    /// let cmd = Command::new("create-repo", Vec::<String>::new());
    /// assert_eq!(Action::resolve(&cmd), None);
    /// ```
    pub fn resolve(command: &Command) -> Option<Action> {
        let args = &command.args;

        match command.name.as_str() {
            "create-repo" => args.first().map(|name| Action::CreateRepo { name: name.clone() }),
            "add-user" => args.first().map(|user| Action::AddUser {
                user: strip_at_sign(user).to_string(),
            }),
            "create-team" => args.first().map(|team| Action::CreateTeam {
                team: strip_at_sign(team).to_string(),
            }),
            "add-team-user" => match args.split_first() {
                Some((team, users)) if !users.is_empty() => Some(Action::AddTeamUsers {
                    team: strip_at_sign(team).to_string(),
                    users: users.iter().map(|u| strip_at_sign(u).to_string()).collect(),
                }),
                _ => None,
            },
            "version" => Some(Action::Version),
            BARREL_ROLL => Some(Action::BarrelRoll),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::CreateRepo { name } => write!(f, "create-repo {}", name),
            Action::AddUser { user } => write!(f, "add-user @{}", user),
            Action::CreateTeam { team } => write!(f, "create-team {}", team),
            Action::AddTeamUsers { team, users } => {
                write!(f, "add-team-user {}", team)?;
                for user in users {
                    write!(f, " @{}", user)?;
                }
                Ok(())
            }
            Action::Version => f.write_str("version"),
            Action::BarrelRoll => f.write_str(BARREL_ROLL),
        }
    }
}

/// Removes one leading `@` from a user or team name.
pub fn strip_at_sign(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}
