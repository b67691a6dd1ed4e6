//! GitHub webhook signature verification.
//!
//! GitHub signs webhook payloads with an HMAC of the raw body under a shared
//! secret. The bot checks the HMAC-SHA1 signature carried in the
//! `X-Hub-Signature` header as `sha1=<hex>`. GitHub also sends an
//! HMAC-SHA256 signature in `X-Hub-Signature-256` as `sha256=<hex>`, which
//! is accepted when the SHA-1 header is missing.
//!
//! The MAC is always computed over the bytes exactly as received. Parsing and
//! re-serializing the JSON would change whitespace and break the signature.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// The HMAC digest a signature header was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// `X-Hub-Signature: sha1=<hex>`
    Sha1,
    /// `X-Hub-Signature-256: sha256=<hex>`
    Sha256,
}

impl SignatureScheme {
    /// The prefix of the header value, including the `=`.
    pub fn prefix(&self) -> &'static str {
        match self {
            SignatureScheme::Sha1 => "sha1=",
            SignatureScheme::Sha256 => "sha256=",
        }
    }

    /// The (lowercase) HTTP header GitHub carries this signature in.
    pub fn header_name(&self) -> &'static str {
        match self {
            SignatureScheme::Sha1 => "x-hub-signature",
            SignatureScheme::Sha256 => "x-hub-signature-256",
        }
    }
}

/// Parses a GitHub signature header (e.g., "sha1=abc123...") into its scheme
/// and raw bytes.
///
/// Returns `None` for malformed headers (unknown prefix, invalid hex, etc.).
/// Never panics.
///
/// # Examples
///
/// ```
/// use nodeschool_bot::webhooks::{parse_signature_header, SignatureScheme};
///
/// let (scheme, sig) = parse_signature_header("sha1=abcd1234").unwrap();
/// assert_eq!(scheme, SignatureScheme::Sha1);
/// assert_eq!(sig, vec![0xab, 0xcd, 0x12, 0x34]);
///
/// // Invalid: missing prefix
/// assert!(parse_signature_header("abcd1234").is_none());
///
/// // Invalid: bad hex
/// assert!(parse_signature_header("sha1=xyz").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<(SignatureScheme, Vec<u8>)> {
    let (scheme, hex_sig) = if let Some(rest) = header.strip_prefix("sha1=") {
        (SignatureScheme::Sha1, rest)
    } else if let Some(rest) = header.strip_prefix("sha256=") {
        (SignatureScheme::Sha256, rest)
    } else {
        return None;
    };

    hex::decode(hex_sig).ok().map(|sig| (scheme, sig))
}

/// Computes the HMAC signature of a payload using the given secret.
///
/// This is useful for testing purposes (generating expected signatures).
pub fn compute_signature(scheme: SignatureScheme, payload: &[u8], secret: &[u8]) -> Vec<u8> {
    match scheme {
        SignatureScheme::Sha1 => {
            let mut mac =
                HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
        SignatureScheme::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Formats a signature as a GitHub-style header value, e.g. `"sha1=<hex>"`.
pub fn format_signature_header(scheme: SignatureScheme, signature: &[u8]) -> String {
    format!("{}{}", scheme.prefix(), hex::encode(signature))
}

/// Verifies a GitHub webhook signature against the payload and secret.
///
/// The scheme is taken from the header prefix. Returns `true` only if the
/// header is well formed and the MAC matches. Comparison is constant-time via
/// the HMAC library, so all mismatches are rejected the same way.
///
/// # Examples
///
/// ```
/// use nodeschool_bot::webhooks::{
///     compute_signature, format_signature_header, verify_signature, SignatureScheme,
/// };
///
/// let payload = br#"{"action":"created"}"#;
/// let secret = b"my-secret-key";
///
/// let sig = compute_signature(SignatureScheme::Sha1, payload, secret);
/// let header = format_signature_header(SignatureScheme::Sha1, &sig);
///
/// assert!(verify_signature(payload, &header, secret));
/// assert!(!verify_signature(payload, &header, b"wrong-secret"));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let Some((scheme, expected_signature)) = parse_signature_header(signature_header) else {
        return false;
    };

    match scheme {
        SignatureScheme::Sha1 => match HmacSha1::new_from_slice(secret) {
            Ok(mut mac) => {
                mac.update(payload);
                mac.verify_slice(&expected_signature).is_ok()
            }
            Err(_) => false,
        },
        SignatureScheme::Sha256 => match HmacSha256::new_from_slice(secret) {
            Ok(mut mac) => {
                mac.update(payload);
                mac.verify_slice(&expected_signature).is_ok()
            }
            Err(_) => false,
        },
    }
}
