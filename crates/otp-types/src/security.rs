//! # Capability Token Sealing
//!
//! A `CapabilityToken` is the forge-proof "who created this" handle embedded
//! under the `_ci_` extra.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Seal**: Tokens are sealed with a secret only the issuing
//!   platform holds.
//! - **Claimed vs. Recorded Creator**: `claimed_creator` is plain data. The
//!   creator is authentic only when the seal verifies under the platform secret.
//! - **Constant-Time Comparison**: Seal checks go through `Mac::verify_slice`.
//! - **Fresh Identity**: Every minted token carries a new random `Uuid`.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Domain separation tag mixed into every seal.
const SEAL_DOMAIN: &[u8] = b"otp-capability-token/v1";

/// Opaque platform-issued handle bound to its creator's package identity.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityToken {
    id: Uuid,
    creator_package: String,
    #[serde_as(as = "Bytes")]
    seal: [u8; 32],
}

impl CapabilityToken {
    /// Assembles a token from raw parts.
    ///
    /// Anyone can do this; a token built with a seal that was not produced by
    /// the platform resolves to no creator.
    pub fn from_parts(id: Uuid, creator_package: impl Into<String>, seal: [u8; 32]) -> Self {
        Self {
            id,
            creator_package: creator_package.into(),
            seal,
        }
    }

    /// Unique identifier of this token instance.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The creator package as written in the token. Not authenticated.
    pub fn claimed_creator(&self) -> &str {
        &self.creator_package
    }

    pub fn seal(&self) -> &[u8; 32] {
        &self.seal
    }
}

fn keyed_mac(platform_secret: &[u8], id: &Uuid, creator_package: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(platform_secret).ok()?;
    mac.update(SEAL_DOMAIN);
    mac.update(id.as_bytes());
    // Length prefix keeps (id, creator) pairs unambiguous.
    mac.update(&(creator_package.len() as u64).to_le_bytes());
    mac.update(creator_package.as_bytes());
    Some(mac)
}

/// Computes the seal binding `id` to `creator_package`.
///
/// # Returns
///
/// `None` only if the MAC cannot be keyed with `platform_secret`.
pub fn seal_token(id: &Uuid, creator_package: &str, platform_secret: &[u8]) -> Option<[u8; 32]> {
    let mac = keyed_mac(platform_secret, id, creator_package)?;
    let mut seal = [0u8; 32];
    seal.copy_from_slice(&mac.finalize().into_bytes());
    Some(seal)
}

/// Checks that `token` was sealed under `platform_secret`.
///
/// # Returns
///
/// - `true` if the seal matches the token's id and claimed creator
/// - `false` if the token was forged, tampered with or sealed by another platform
pub fn validate_seal(token: &CapabilityToken, platform_secret: &[u8]) -> bool {
    match keyed_mac(platform_secret, &token.id, &token.creator_package) {
        Some(mac) => mac.verify_slice(&token.seal).is_ok(),
        None => false,
    }
}
