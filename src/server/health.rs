//! Liveness and greeting endpoints.

use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;

/// Health check handler.
///
/// Returns 200 OK with the text "OK". Used by load balancers to verify that
/// the server is running and accepting connections.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Answers `GET /` with a short greeting naming the bot.
pub async fn greeting_handler<G>(State(app_state): State<AppState<G>>) -> (StatusCode, String) {
    let handle = &app_state.relay().settings().handle;
    (StatusCode::OK, format!("hello, i am the {}\n", handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotSettings;
    use crate::relay::Relay;
    use crate::test_utils::RecordingGitHub;

    #[tokio::test]
    async fn health_returns_200_ok() {
        let (status, body) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn greeting_uses_configured_handle() {
        let settings = BotSettings {
            handle: "chapterbot".into(),
            ..BotSettings::default()
        };
        let relay = Relay::new(RecordingGitHub::new(), settings).unwrap();
        let state = AppState::new(relay, b"secret".to_vec(), true);

        let (status, body) = greeting_handler(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello, i am the chapterbot\n");
    }
}
