//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that host applications call
//! - **Outbound (Driven)**: Platform services this SDK needs

pub mod inbound;
pub mod outbound;
