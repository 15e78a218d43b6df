//! Handshake configuration from environment variables.

use otp_types::keys::DEFAULT_SDK_VERSION;
use std::env;

/// Version recorded in this crate's manifest at build time.
const MANIFEST_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Builder configuration. Set once at construction, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Whether the SDK version is embedded in outbound handshakes.
    pub send_sdk_version: bool,

    /// Discovered SDK version; `None` means no version metadata is available.
    pub sdk_version: Option<String>,

    /// Log receiver resolution for each target package while building.
    pub debug_diagnostics: bool,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            send_sdk_version: true,
            sdk_version: MANIFEST_VERSION.map(str::to_string),
            debug_diagnostics: false,
        }
    }
}

impl HandshakeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTP_SEND_SDK_VERSION`: Embed the SDK version (default: true)
    /// - `OTP_SDK_VERSION`: Override the reported version (default: crate manifest)
    /// - `OTP_DEBUG_DIAGNOSTICS`: Log receiver resolution (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            send_sdk_version: env::var("OTP_SEND_SDK_VERSION")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.send_sdk_version),

            sdk_version: env::var("OTP_SDK_VERSION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(defaults.sdk_version),

            debug_diagnostics: env::var("OTP_DEBUG_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.debug_diagnostics),
        }
    }

    /// Configuration with version reporting toggled.
    pub fn with_send_sdk_version(send_sdk_version: bool) -> Self {
        Self {
            send_sdk_version,
            ..Self::default()
        }
    }

    /// Configuration for a build with no discoverable version metadata.
    pub fn without_manifest() -> Self {
        Self {
            sdk_version: None,
            ..Self::default()
        }
    }

    /// The version string to embed, falling back to the default literal.
    pub fn resolved_sdk_version(&self) -> &str {
        self.sdk_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SDK_VERSION)
    }
}
