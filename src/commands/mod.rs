//! Command parsing for bot commands.
//!
//! Users drive the bot by mentioning it in issue comments, one command per
//! line.
//!
//! # Supported Commands
//!
//! - `@{handle} help` - Shows the help text
//! - `@{handle} create-repo {name}` - Creates an organization repository
//! - `@{handle} add-user {username}` - Adds a user to the organizer team
//! - `@{handle} create-team {team}` - Creates an organization team
//! - `@{handle} add-team-user {team} {username...}` - Adds users to a team
//! - `@{handle} version` - Reports the bot version
//! - "barrel roll" anywhere in a comment that mentions the bot - the easter egg
//!
//! # Example
//!
//! ```
//! use nodeschool_bot::commands::{Action, CommandParser};
//!
//! let parser = CommandParser::new("nodeschoolbot").unwrap();
//! let parsed = parser.parse(Some("@nodeschoolbot add-user @jane"));
//! let actions: Vec<Action> = parsed.commands().iter().filter_map(Action::resolve).collect();
//!
//! assert_eq!(actions, vec![Action::AddUser { user: "jane".into() }]);
//! ```

mod parser;
mod types;

pub use parser::CommandParser;
pub use types::{Action, BARREL_ROLL, Command, ParsedCommands, strip_at_sign};
