//! # Error Types
//!
//! Defines error types shared by the builder and the validator.

use thiserror::Error;

/// Errors raised while reading or decoding an `Intent`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentError {
    /// An extra exists under `key` but holds a different value type.
    #[error("Extra '{key}' has type {found}, expected {expected}")]
    WrongExtraType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The serialized intent could not be encoded or decoded.
    #[error("Intent codec error: {0}")]
    Codec(String),
}

/// Failures reported by the host platform behind the outbound ports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform refused to mint a capability token.
    #[error("Capability token unavailable: {0}")]
    TokenUnavailable(String),

    /// The token authority could not resolve a token.
    #[error("Capability token lookup failed: {0}")]
    TokenLookup(String),

    /// The broadcast channel rejected the intent.
    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),

    /// The package registry could not be queried.
    #[error("Package registry error: {0}")]
    Registry(String),
}

/// Error parsing a counterparty package identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("counterparty package name cannot be empty")]
    Empty,
    #[error("unknown counterparty package: {0}")]
    UnknownPackage(String),
}
