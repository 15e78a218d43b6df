//! # HMAC Token Authority
//!
//! A `TokenAuthority` that seals tokens with a platform-held secret.
//! Every process sharing one authority instance sees the same registry,
//! the way apps on one device share the OS token registry.

use crate::ports::outbound::TokenAuthority;
use otp_types::{seal_token, validate_seal, CapabilityToken, PlatformError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Platform token registry backed by HMAC-SHA256 seals.
#[derive(Clone)]
pub struct HmacTokenAuthority {
    secret: Arc<[u8]>,
}

impl HmacTokenAuthority {
    /// Creates an authority with an explicit platform secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Creates an authority with a random 32-byte secret.
    pub fn random() -> Self {
        let mut secret = Vec::with_capacity(32);
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        Self::new(secret)
    }

    /// Mints a token recorded as created by `package`.
    ///
    /// This is the privileged platform operation: whoever holds the authority
    /// can attest any package, so tests use it to impersonate issuers.
    pub fn mint_for(&self, package: &str) -> Result<CapabilityToken, PlatformError> {
        let id = Uuid::new_v4();
        let seal = seal_token(&id, package, &self.secret).ok_or_else(|| {
            PlatformError::TokenUnavailable("platform secret rejected by MAC".to_string())
        })?;

        debug!(token_id = %id, creator = package, "Capability token minted");
        Ok(CapabilityToken::from_parts(id, package, seal))
    }
}

impl fmt::Debug for HmacTokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacTokenAuthority")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenAuthority for HmacTokenAuthority {
    fn creator_package(&self, token: &CapabilityToken) -> Result<Option<String>, PlatformError> {
        if validate_seal(token, &self.secret) {
            Ok(Some(token.claimed_creator().to_string()))
        } else {
            debug!(token_id = %token.id(), "Capability token seal did not verify");
            Ok(None)
        }
    }
}
