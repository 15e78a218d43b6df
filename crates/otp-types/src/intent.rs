//! # `Intent` Message
//!
//! The single message shape used in both directions of the handshake.
//!
//! ## Wire Layout
//!
//! - **Addressing**: `package` names the receiving application, `action` names
//!   the protocol operation.
//! - **Extras**: A case-sensitive key/value map. Values are either strings or a
//!   `CapabilityToken`.
//! - **Identity**: The sender is never read from a plain field; it is resolved
//!   from the token stored under [`keys::CALLER_INFO`].

use crate::errors::IntentError;
use crate::security::CapabilityToken;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved wire keys and literals of the handshake protocol.
pub mod keys {
    /// Action tag of the outbound handshake.
    pub const OTP_REQUESTED_ACTION: &str = "com.whatsapp.otp.OTP_REQUESTED";

    /// Extra holding the capability token (both directions).
    pub const CALLER_INFO: &str = "_ci_";

    /// Extra holding the requester's SDK version (outbound only).
    pub const SDK_VERSION: &str = "SDK_VERSION";

    /// Version reported when no version metadata can be discovered.
    pub const DEFAULT_SDK_VERSION: &str = "0.1.0_not_from_manifest";

    /// Extra holding the one-time code (inbound).
    pub const CODE: &str = "code";

    /// Extra holding the diagnostic identifier (inbound).
    pub const OTP_ERROR_IDENTIFIER: &str = "error";

    /// Extra holding the diagnostic message (inbound).
    pub const OTP_ERROR_MESSAGE: &str = "error_message";
}

/// A typed extra value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Extra {
    String(String),
    Token(CapabilityToken),
}

impl Extra {
    fn type_name(&self) -> &'static str {
        match self {
            Extra::String(_) => "string",
            Extra::Token(_) => "token",
        }
    }
}

/// An addressed message with typed extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Receiving application package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Protocol action tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default)]
    extras: BTreeMap<String, Extra>,
}

impl Intent {
    /// Creates an empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Stores a string extra, replacing any previous value under `key`.
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.insert(key.into(), Extra::String(value.into()));
    }

    /// Stores a token extra, replacing any previous value under `key`.
    pub fn put_token(&mut self, key: impl Into<String>, token: CapabilityToken) {
        self.extras.insert(key.into(), Extra::Token(token));
    }

    pub fn remove_extra(&mut self, key: &str) -> Option<Extra> {
        self.extras.remove(key)
    }

    pub fn has_extra(&self, key: &str) -> bool {
        self.extras.contains_key(key)
    }

    pub fn extra(&self, key: &str) -> Option<&Extra> {
        self.extras.get(key)
    }

    pub fn extras(&self) -> impl Iterator<Item = (&str, &Extra)> {
        self.extras.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reads a string extra.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` if the key is absent
    /// - `Err(IntentError::WrongExtraType)` if the key holds a token
    pub fn string_extra(&self, key: &str) -> Result<Option<&str>, IntentError> {
        match self.extras.get(key) {
            None => Ok(None),
            Some(Extra::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(IntentError::WrongExtraType {
                key: key.to_string(),
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// Reads a token extra. A value of any other type reads as absent.
    pub fn token_extra(&self, key: &str) -> Option<&CapabilityToken> {
        match self.extras.get(key) {
            Some(Extra::Token(token)) => Some(token),
            _ => None,
        }
    }

    /// Encodes the intent for an external transport.
    pub fn to_json(&self) -> Result<String, IntentError> {
        serde_json::to_string(self).map_err(|e| IntentError::Codec(e.to_string()))
    }

    /// Decodes an intent received from an external transport.
    pub fn from_json(raw: &str) -> Result<Self, IntentError> {
        serde_json::from_str(raw).map_err(|e| IntentError::Codec(e.to_string()))
    }
}
