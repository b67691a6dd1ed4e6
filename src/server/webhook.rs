//! Webhook endpoint handler.
//!
//! Verifies the signature over the raw body, parses the comment event and
//! runs it through the relay before answering. GitHub only sees the status
//! code: 200 when the delivery was handled or deliberately dropped, 500 when
//! an action or the reply failed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{debug, error, warn};

use super::AppState;
use crate::effects::GitHubInterpreter;
use crate::relay::RelayOutcome;
use crate::webhooks::{SignatureScheme, parse_event, verify_signature};

/// Returns the signature header to check, preferring the SHA-1 one.
fn signature_header(headers: &HeaderMap) -> Option<&str> {
    [SignatureScheme::Sha1, SignatureScheme::Sha256]
        .into_iter()
        .find_map(|scheme| headers.get(scheme.header_name()))
        .and_then(|value| value.to_str().ok())
}

/// Returns true if the delivery carries a valid signature for `secret`.
fn is_authentic(headers: &HeaderMap, body: &[u8], secret: &[u8]) -> bool {
    signature_header(headers).is_some_and(|header| verify_signature(body, header, secret))
}

/// Webhook handler.
///
/// # Response
///
/// - 200 OK with an empty body: processed, or dropped because the signature
///   was invalid, the body was unparseable or there was nothing to do
/// - 500 Internal Server Error: an action or the reply failed; an error
///   comment was attempted on the issue
pub async fn webhook_handler<G>(
    State(app_state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode
where
    G: GitHubInterpreter + Send + Sync + 'static,
{
    // Verify signature BEFORE any parsing.
    if app_state.verify_signatures()
        && !is_authentic(&headers, &body, app_state.webhook_secret())
    {
        warn!("Invalid or missing webhook signature");
        return StatusCode::OK;
    }

    let event = match parse_event(&body) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "Ignoring delivery that is not a comment event");
            return StatusCode::OK;
        }
    };

    match app_state.relay().handle(&event).await {
        RelayOutcome::Failed(e) => {
            error!(error = %e, origin = %event.origin, "Failed to handle command");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        outcome => {
            debug!(?outcome, "Handled delivery");
            StatusCode::OK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhooks::{compute_signature, format_signature_header};
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn prefers_sha1_header() {
        let mut headers = headers_with("x-hub-signature-256", "sha256=00");
        headers.insert("x-hub-signature", HeaderValue::from_static("sha1=11"));

        assert_eq!(signature_header(&headers), Some("sha1=11"));
    }

    #[test]
    fn falls_back_to_sha256_header() {
        let headers = headers_with("x-hub-signature-256", "sha256=00");
        assert_eq!(signature_header(&headers), Some("sha256=00"));
    }

    #[test]
    fn no_header_is_not_authentic() {
        assert!(!is_authentic(&HeaderMap::new(), b"{}", b"secret"));
    }

    #[test]
    fn authentic_body_is_accepted() {
        let body = br#"{"zen":"Keep it logically awesome."}"#;
        let signature = compute_signature(SignatureScheme::Sha1, body, b"secret");
        let headers = headers_with(
            "x-hub-signature",
            &format_signature_header(SignatureScheme::Sha1, &signature),
        );

        assert!(is_authentic(&headers, body, b"secret"));
        assert!(!is_authentic(&headers, b"{}", b"secret"));
    }
}
