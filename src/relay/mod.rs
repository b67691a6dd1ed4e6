//! The command relay: from an inbound comment to exactly one reply.
//!
//! The pipeline for one event is:
//!
//! 1. Parse the comment body into commands. No commands, no reply.
//! 2. Drop the bot's own comments.
//! 3. Authorize the sender against the organizer team.
//! 4. Resolve commands to actions and run them concurrently.
//! 5. Fold the successes into an [`AggregatedReport`] and render it.
//! 6. Post the reply.
//!
//! Every step that fails ends in a comment on the originating issue when
//! possible, and in [`RelayOutcome::Failed`] so the server can answer 500.

pub mod authorize;
pub mod executor;
pub mod format;
pub mod report;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::commands::{Action, CommandParser, ParsedCommands};
use crate::config::BotSettings;
use crate::effects::{GitHubEffect, GitHubInterpreter};
use crate::webhooks::{InboundEvent, Origin};

pub use authorize::{AuthorizationError, authorize, is_own_comment};
pub use executor::{ActionExecutor, ActionFailure, ActionSuccess, ExecutionOutcome, VERSION, settle};
pub use report::{AggregatedReport, Notice, TeamInvite};

/// Why an event produced no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoText,
    NoCommands,
    OwnComment,
}

/// A failure the server reports as HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("action failed: {0}")]
    Action(#[from] ActionFailure),

    #[error("could not post reply: {0}")]
    Reply(String),
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Ignored(IgnoreReason),
    /// The sender was told they are not allowed.
    Rejected,
    /// The actions ran and the reply was posted.
    Replied,
    Failed(RelayError),
}

impl RelayOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RelayOutcome::Failed(_))
    }
}

/// Processes inbound events against one organization.
pub struct Relay<G> {
    github: G,
    settings: BotSettings,
    parser: CommandParser,
}

impl<G> std::fmt::Debug for Relay<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<G> Relay<G> {
    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    pub fn github(&self) -> &G {
        &self.github
    }
}

impl<G: GitHubInterpreter + Sync> Relay<G> {
    pub fn new(github: G, settings: BotSettings) -> Result<Self, regex::Error> {
        let parser = CommandParser::new(&settings.handle)?;
        Ok(Relay {
            github,
            settings,
            parser,
        })
    }

    /// Handles one event end to end.
    #[instrument(skip_all, fields(sender = %event.sender, origin = %event.origin))]
    pub async fn handle(&self, event: &InboundEvent) -> RelayOutcome {
        let commands = match self.parser.parse(event.body.as_deref()) {
            ParsedCommands::NoText => return RelayOutcome::Ignored(IgnoreReason::NoText),
            ParsedCommands::NoneRecognized => {
                return RelayOutcome::Ignored(IgnoreReason::NoCommands);
            }
            ParsedCommands::Commands(commands) => commands,
        };

        if is_own_comment(&event.sender, &self.settings.handle) {
            return RelayOutcome::Ignored(IgnoreReason::OwnComment);
        }

        if let Err(e) = authorize(
            &self.github,
            self.settings.organizers_team_id,
            &event.sender,
        )
        .await
        {
            info!(error = %e, "Sender not authorized");
            let body = format::rejection_message(&event.sender, &self.settings);
            return self
                .reply(&event.origin, body, RelayOutcome::Rejected)
                .await;
        }

        let actions: Vec<Action> = commands.iter().filter_map(Action::resolve).collect();
        info!(commands = commands.len(), actions = actions.len(), "Executing actions");

        let executor = ActionExecutor::new(&self.github, &self.settings);
        let outcomes = executor.execute_all(&actions).await;

        let successes = match settle(outcomes) {
            Ok(successes) => successes,
            Err(failure) => {
                warn!(action = %failure.action, detail = %failure.detail, "Replying with error");
                self.post_best_effort(&event.origin, format::error_message(&failure.detail))
                    .await;
                return RelayOutcome::Failed(RelayError::Action(failure));
            }
        };

        let report = AggregatedReport::from_successes(successes);
        let body = format::render_reply(&report, &self.settings);

        self.reply(&event.origin, body, RelayOutcome::Replied).await
    }

    /// Posts the one reply for an event and returns `posted` on success.
    ///
    /// If the reply cannot be posted, an error comment with the diagnostic
    /// is attempted instead.
    async fn reply(&self, origin: &Origin, body: String, posted: RelayOutcome) -> RelayOutcome {
        match self.post(origin, body).await {
            Ok(()) => posted,
            Err(detail) => {
                self.post_best_effort(origin, format::error_message(&detail))
                    .await;
                RelayOutcome::Failed(RelayError::Reply(detail))
            }
        }
    }

    async fn post(&self, origin: &Origin, body: String) -> Result<(), String> {
        let effect = GitHubEffect::PostComment {
            origin: origin.clone(),
            body,
        };
        match self.github.interpret(effect).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let detail = e.to_string();
                warn!(error = %detail, "Failed to post comment");
                Err(detail)
            }
        }
    }

    async fn post_best_effort(&self, origin: &Origin, body: String) {
        // Already failing; a second failure is only logged.
        let _ = self.post(origin, body).await;
    }
}
