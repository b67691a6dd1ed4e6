//! Webhook handling for GitHub comment events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA1, HMAC-SHA256)
//! - Parsing of comment payloads into [`InboundEvent`]

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{InboundEvent, Origin};
pub use parser::{ParseError, parse_event};
pub use signature::{
    SignatureScheme, compute_signature, format_signature_header, parse_signature_header,
    verify_signature,
};
