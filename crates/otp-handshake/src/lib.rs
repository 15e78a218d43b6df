//! # OTP Handshake
//!
//! Requests one-time-passcode autofill from the trusted messaging
//! counterparties and authenticates the replies they send back.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Issuer matching and error classification, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service/`): Builder, handshake sender, inbound handler
//! - **Adapters Layer** (`adapters/`): HMAC token authority and in-memory platform
//!
//! ## Security Notes
//!
//! - **Forged-Sender Rejection**: A payload is read only after the platform
//!   authority confirms the token's creator is an allowed counterparty
//! - **Exact Matching**: Package names are compared byte for byte
//! - **Stateless**: No state survives a call; every intent is judged alone

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{HmacTokenAuthority, InMemoryPlatform};
pub use config::HandshakeConfig;
pub use domain::entities::{ComponentState, OtpErrorKind, OtpFailure, ValidationOutcome};
pub use domain::errors::{ExtractError, HandshakeError};
pub use ports::inbound::{IncomingOtpApi, OtpHandshakeApi, RequestBuilderApi};
pub use ports::outbound::{
    Broadcaster, ComponentRegistry, PackageRegistry, RequesterContext, TokenAuthority,
    TokenIssuer,
};
pub use service::{ComponentSwitch, IncomingIntentHandler, IntentBuilder, OtpHandler};
