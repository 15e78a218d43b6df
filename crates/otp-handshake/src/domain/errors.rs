//! # Handshake Errors
//!
//! Error types for building outbound handshakes and reading inbound intents.

use crate::domain::entities::OtpErrorKind;
use otp_types::{IntentError, PlatformError};
use thiserror::Error;

/// Errors surfaced directly by the request builder and the send path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// A caller-supplied argument cannot be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The platform failed to mint a token or deliver the intent.
    #[error("Platform failure: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors raised while validating or extracting an inbound intent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Token absent, unresolvable, or created by a package outside the allow-list.
    #[error("Intent is not from a trusted counterparty (issuer: {issuer:?})")]
    UntrustedSource { issuer: Option<String> },

    /// An extra holds an unexpected type, or the raw intent did not decode.
    #[error("Malformed intent: {0}")]
    Malformed(#[from] IntentError),

    /// The token authority failed while resolving the creator.
    #[error("Platform failure: {0}")]
    Platform(#[from] PlatformError),
}

impl ExtractError {
    /// Maps this error onto the flat callback taxonomy.
    pub fn kind(&self) -> OtpErrorKind {
        match self {
            ExtractError::UntrustedSource { .. } => OtpErrorKind::UntrustedSource,
            ExtractError::Malformed(_) | ExtractError::Platform(_) => OtpErrorKind::Unclassified,
        }
    }
}
