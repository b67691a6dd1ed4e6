//! HTTP server for the bot.
//!
//! # Endpoints
//!
//! - `GET /` - Greeting, useful to check the bot is reachable
//! - `POST /` and `POST /webhook` - Accept GitHub comment webhooks
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::{greeting_handler, health_handler};
pub use webhook::webhook_handler;

use crate::effects::GitHubInterpreter;
use crate::relay::Relay;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
pub struct AppState<G> {
    inner: Arc<AppStateInner<G>>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<G> {
    /// Webhook secret for HMAC signature verification.
    webhook_secret: Vec<u8>,

    /// When false, deliveries are accepted without a signature check.
    verify_signatures: bool,

    relay: Relay<G>,
}

impl<G> AppState<G> {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `relay` - Processes verified events
    /// * `webhook_secret` - Secret for verifying webhook signatures
    /// * `verify_signatures` - Whether to check signatures at all
    pub fn new(relay: Relay<G>, webhook_secret: impl Into<Vec<u8>>, verify_signatures: bool) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                verify_signatures,
                relay,
            }),
        }
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    pub fn verify_signatures(&self) -> bool {
        self.inner.verify_signatures
    }

    pub fn relay(&self) -> &Relay<G> {
        &self.inner.relay
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<G>(app_state: AppState<G>) -> axum::Router
where
    G: GitHubInterpreter + Send + Sync + 'static,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/", get(greeting_handler::<G>).post(webhook_handler::<G>))
        .route("/webhook", post(webhook_handler::<G>))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
