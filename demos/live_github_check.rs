//! Manual check of the GitHub interpreter against a real organization.
//!
//! Only read-only effects are exercised: listing the organization's teams
//! and looking up a team membership. Nothing is created or posted.
//!
//! # Usage
//!
//! 1. Set `TOKEN` to a token that can read the organization's teams
//!    (`read:org` scope for classic tokens).
//! 2. Set `GITHUB_ORG` (default `nodeschool`).
//! 3. Optionally set `CHECK_USER` to a login whose membership in the
//!    organizer team should be looked up, and `ORGANIZERS_TEAM_ID` to the
//!    team to check (default 1660004).
//! 4. Run: `cargo run --example live_github_check`

use std::env;

use nodeschool_bot::config::{DEFAULT_ORG, DEFAULT_ORGANIZERS_TEAM_ID};
use nodeschool_bot::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use nodeschool_bot::github::OctocrabClient;
use nodeschool_bot::relay::authorize;
use nodeschool_bot::types::TeamId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nodeschool_bot=debug".into()),
        )
        .init();

    let token =
        env::var("TOKEN").map_err(|_| anyhow::anyhow!("TOKEN environment variable not set"))?;
    let org = env::var("GITHUB_ORG").unwrap_or_else(|_| DEFAULT_ORG.to_string());
    let team = env::var("ORGANIZERS_TEAM_ID")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(TeamId)
        .unwrap_or(TeamId(DEFAULT_ORGANIZERS_TEAM_ID));
    let user = env::var("CHECK_USER").ok();

    let client = OctocrabClient::from_token(token, org.clone())?;

    println!("\n=== Live GitHub Check ===\n");
    println!("Organization: {}", org);
    println!("Organizer team: {}", team);
    println!();

    let mut failed = 0;

    println!("--- Teams ---");
    match client.interpret(GitHubEffect::ListTeams).await {
        Ok(GitHubResponse::Teams(teams)) => {
            println!("  [PASS] ListTeams ({} teams found)", teams.len());
            for t in teams.iter().take(10) {
                println!("         {} {} ({})", t.id, t.slug, t.name);
            }
            match teams.iter().find(|t| t.id == team) {
                Some(t) => println!("  [PASS] Organizer team is `{}`", t.slug),
                None => {
                    println!("  [FAIL] Organizer team {} not in the organization", team);
                    failed += 1;
                }
            }
        }
        Ok(other) => {
            println!("  [FAIL] ListTeams: unexpected response {:?}", other);
            failed += 1;
        }
        Err(e) => {
            println!("  [FAIL] ListTeams: {}", e);
            failed += 1;
        }
    }

    println!("\n--- Membership ---");
    match user {
        Some(user) => match authorize(&client, team, &user).await {
            Ok(()) => println!("  [PASS] @{} is an active organizer", user),
            Err(e) => println!("  [INFO] @{} would be rejected: {}", user, e),
        },
        None => println!("  [SKIP] GetTeamMembership (no CHECK_USER set)"),
    }

    println!();
    if failed > 0 {
        anyhow::bail!("{} check(s) failed", failed);
    }
    println!("All checks passed.");
    Ok(())
}
