//! GitHub webhook payload parser.
//!
//! Parses raw webhook JSON into an [`InboundEvent`]. Unknown fields are
//! ignored; the fields needed to reply (`sender`, `repository`, `issue`)
//! are required, while the comment itself is optional so that deliveries
//! without one parse cleanly and are then treated as "nothing to do".

use serde::Deserialize;
use thiserror::Error;

use crate::types::{InvalidRepoName, IssueNumber, RepoId};

use super::events::{InboundEvent, Origin};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// `repository.full_name` is not `owner/repo`.
    #[error(transparent)]
    InvalidRepository(#[from] InvalidRepoName),
}

/// Parses a webhook payload into an [`InboundEvent`].
///
/// # Examples
///
/// ```
/// use nodeschool_bot::webhooks::parse_event;
///
/// let payload = br#"{
///     "action": "created",
///     "sender": { "login": "octocat" },
///     "comment": { "body": "@nodeschoolbot create-repo nyc" },
///     "repository": { "full_name": "nodeschool/organizers" },
///     "issue": { "number": 42 }
/// }"#;
///
/// let event = parse_event(payload).unwrap();
/// assert_eq!(event.sender, "octocat");
/// assert_eq!(event.origin.issue.0, 42);
/// assert_eq!(event.body.as_deref(), Some("@nodeschoolbot create-repo nyc"));
/// ```
pub fn parse_event(payload: &[u8]) -> Result<InboundEvent, ParseError> {
    let raw: RawCommentPayload = serde_json::from_slice(payload)?;

    let repo = RepoId::parse_full_name(&raw.repository.full_name)?;

    Ok(InboundEvent {
        sender: raw.sender.login,
        body: raw.comment.and_then(|c| c.body),
        origin: Origin::new(repo, IssueNumber(raw.issue.number)),
    })
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match GitHub's webhook JSON structure, reduced to the fields the bot
// reads.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawCommentPayload {
    sender: RawUser,
    comment: Option<RawComment>,
    repository: RawRepository,
    issue: RawIssue,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
}
