//! # Adapters Layer
//!
//! Platform implementations of the outbound ports.

pub mod authority;
pub mod memory;

pub use authority::HmacTokenAuthority;
pub use memory::InMemoryPlatform;
