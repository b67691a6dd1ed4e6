//! Core domain types for the bot.
//!
//! Identifiers shared by the webhook, effect and relay layers.

pub mod ids;

pub use ids::{CommentId, InvalidRepoName, IssueNumber, RepoId, TeamId};
