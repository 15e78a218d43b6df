//! # OTP Types Crate
//!
//! This crate contains the wire-level `Intent` model, the closed set of
//! trusted counterparty identities and the `CapabilityToken` that travels
//! inside every handshake.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Wire keys and the action tag are defined here
//!   and nowhere else.
//! - **Token Authority**: A token's `claimed_creator` is never trusted on its
//!   own; only a seal check by the issuing platform resolves a creator.
//! - **Closed Identity Set**: `CounterpartyIdentity` cannot be extended at
//!   runtime.

pub mod entities;
pub mod errors;
pub mod intent;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use intent::{keys, Extra, Intent};
pub use security::*;
