//! # Outbound Ports (Driven Ports / SPI)
//!
//! Platform services the SDK depends on. All queries are synchronous and
//! reentrant; none of them are cached by the SDK.

use crate::domain::entities::ComponentState;
use otp_types::{CapabilityToken, Intent, PlatformError};

/// Mints tokens on behalf of the calling process.
///
/// The creator is always the caller's own package; no caller can choose it.
pub trait TokenIssuer: Send + Sync {
    /// Mint a fresh token bound to the caller's package.
    ///
    /// The token is used only for identity attestation, so minting must not
    /// require any foreground UI to back it.
    fn mint(&self) -> Result<CapabilityToken, PlatformError>;
}

/// The platform's capability token registry.
///
/// Only the authority can attest who created a token. Implementations must
/// make `creator_package` unforgeable by any party other than themselves.
pub trait TokenAuthority: Send + Sync {
    /// Resolve the recorded creator of `token`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(package))` if the authority issued this token
    /// - `Ok(None)` if the token was not issued by this authority
    /// - `Err(_)` if the lookup itself failed
    fn creator_package(&self, token: &CapabilityToken) -> Result<Option<String>, PlatformError>;
}

/// Fire-and-forget delivery of an intent to its addressed package.
pub trait Broadcaster: Send + Sync {
    fn send_broadcast(&self, intent: &Intent) -> Result<(), PlatformError>;
}

/// Read-only view of the installed applications.
pub trait PackageRegistry: Send + Sync {
    /// Names of receivers under `package` that handle `action`.
    fn broadcast_receivers(&self, package: &str, action: &str) -> Vec<String>;

    fn is_package_installed(&self, package: &str) -> bool;
}

/// Enables or disables the host's own components.
pub trait ComponentRegistry: Send + Sync {
    fn set_component_enabled(
        &self,
        component: &str,
        state: ComponentState,
    ) -> Result<(), PlatformError>;
}

/// Everything the send path needs from the requesting process.
pub trait RequesterContext: TokenIssuer + Broadcaster + PackageRegistry {
    /// The requester's own package identity. Tokens are minted for it.
    fn package_name(&self) -> &str;
}
