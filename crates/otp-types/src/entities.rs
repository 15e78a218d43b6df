//! # Domain Entities
//!
//! Counterparty identities and the diagnostic signal payload.

use crate::errors::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// COUNTERPARTY IDENTITY
// =============================================================================

/// One of the two trusted messaging applications.
///
/// The package name is used both to address outbound handshakes and to
/// validate the creator of inbound capability tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CounterpartyIdentity {
    /// The consumer application.
    Consumer,
    /// The business application.
    Business,
}

impl CounterpartyIdentity {
    /// Every known identity, in handshake fan-out order.
    pub const ALL: [CounterpartyIdentity; 2] =
        [CounterpartyIdentity::Consumer, CounterpartyIdentity::Business];

    /// The package identifier of this counterparty.
    pub const fn package_name(self) -> &'static str {
        match self {
            CounterpartyIdentity::Consumer => "com.whatsapp",
            CounterpartyIdentity::Business => "com.whatsapp.w4b",
        }
    }

    /// Look up the identity owning `package`. Exact, case-sensitive match.
    pub fn from_package(package: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|identity| identity.package_name() == package)
    }
}

impl fmt::Display for CounterpartyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name())
    }
}

impl FromStr for CounterpartyIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdentityError::Empty);
        }
        Self::from_package(s).ok_or_else(|| IdentityError::UnknownPackage(s.to_string()))
    }
}

impl TryFrom<String> for CounterpartyIdentity {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CounterpartyIdentity> for String {
    fn from(identity: CounterpartyIdentity) -> Self {
        identity.package_name().to_string()
    }
}

// =============================================================================
// DEBUG SIGNAL
// =============================================================================

/// Diagnostic pair sent by a counterparty instead of (or alongside) a code.
///
/// Both fields are independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugSignal {
    /// An identifier for the delivery error.
    pub otp_error_identifier: Option<String>,
    /// A human readable message for the delivery error.
    pub otp_error_message: Option<String>,
}

impl DebugSignal {
    pub fn new(otp_error_identifier: Option<String>, otp_error_message: Option<String>) -> Self {
        Self {
            otp_error_identifier,
            otp_error_message,
        }
    }

    /// True when neither field was present in the message.
    pub fn is_empty(&self) -> bool {
        self.otp_error_identifier.is_none() && self.otp_error_message.is_none()
    }
}
