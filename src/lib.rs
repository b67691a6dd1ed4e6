//! NodeSchool Bot - A GitHub bot that administers an organization from issue comments.
//!
//! Organizers mention the bot in a comment (`@nodeschoolbot create-repo nyc`);
//! the bot verifies the webhook, checks that the sender is an active member
//! of the organizer team, runs the requested operations concurrently and
//! answers with a single summary comment.

pub mod commands;
pub mod config;
pub mod effects;
pub mod github;
pub mod relay;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
