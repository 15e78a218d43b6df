//! # Service Layer
//!
//! Application services that implement the inbound ports and delegate trust
//! decisions to the domain layer.

pub mod builder;
pub mod components;
pub mod handshake;
pub mod incoming;

pub use builder::IntentBuilder;
pub use components::ComponentSwitch;
pub use handshake::OtpHandler;
pub use incoming::IncomingIntentHandler;
