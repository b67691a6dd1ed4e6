//! Typed representation of an inbound comment webhook.
//!
//! The bot only reacts to comments, so a single event type covers every
//! delivery it acts on: who wrote the comment, what it says, and where to
//! reply.

use serde::{Deserialize, Serialize};

use crate::types::{IssueNumber, RepoId};

/// The issue or pull request a comment was posted on.
///
/// This is where the bot posts its reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub repo: RepoId,
    pub issue: IssueNumber,
}

impl Origin {
    pub fn new(repo: RepoId, issue: IssueNumber) -> Self {
        Origin { repo, issue }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.repo, self.issue)
    }
}

/// A comment webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Login of the account that triggered the delivery.
    pub sender: String,

    /// The comment text. `None` when the payload has no comment or the
    /// comment body is null.
    pub body: Option<String>,

    /// Where to post the reply.
    pub origin: Origin,
}
