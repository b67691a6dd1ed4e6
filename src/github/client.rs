//! Octocrab client wrapper scoped to a GitHub organization.
//!
//! This module provides `OctocrabClient`, which wraps an `Octocrab` instance
//! and scopes organization-level operations (repositories, teams) to one
//! organization. This matches the design where `GitHubEffect` variants
//! don't carry the organization name.

use octocrab::Octocrab;

/// A GitHub API client scoped to a specific organization.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The organization login this client is scoped to.
    org: String,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given organization.
    pub fn new(client: Octocrab, org: impl Into<String>) -> Self {
        Self {
            client,
            org: org.into(),
        }
    }

    /// Creates a client from a GitHub token.
    ///
    /// The token identifies the bot account; every call is made as that account.
    pub fn from_token(
        token: impl Into<String>,
        org: impl Into<String>,
    ) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client, org))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the organization this client is scoped to.
    pub fn org(&self) -> &str {
        &self.org
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("org", &self.org)
            .finish_non_exhaustive()
    }
}
