use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nodeschool_bot::config::Config;
use nodeschool_bot::github::OctocrabClient;
use nodeschool_bot::relay::Relay;
use nodeschool_bot::server::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nodeschool_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;
    if !config.verify_signatures {
        tracing::warn!("Webhook signature verification is disabled");
    }

    let github = OctocrabClient::from_token(config.github_token.clone(), config.bot.org.clone())
        .context("building GitHub client")?;
    let relay = Relay::new(github, config.bot.clone()).context("compiling command parser")?;
    let app = build_router(AppState::new(
        relay,
        config.webhook_secret.clone(),
        config.verify_signatures,
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(
        handle = %config.bot.handle,
        org = %config.bot.org,
        "{} is now listening for webhooks on {}",
        config.bot.handle,
        addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
