//! Effects-as-data for GitHub operations.
//!
//! This module defines effect types that describe operations without
//! executing them. This enables:
//! - Pure core logic that decides which calls to make
//! - Testability via recording interpreters
//! - Logging/tracing of intended operations

pub mod github;
pub mod interpreter;

pub use github::{GitHubEffect, GitHubResponse, MembershipState, TeamData};
pub use interpreter::GitHubInterpreter;
