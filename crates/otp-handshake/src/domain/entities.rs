//! # Domain Entities
//!
//! Outcomes and error classifications produced while handling inbound intents.

use crate::domain::errors::ExtractError;
use otp_types::CounterpartyIdentity;
use std::fmt;
use thiserror::Error;

/// Result of checking an inbound token against an allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The token's recorded creator is this allowed counterparty.
    Valid(CounterpartyIdentity),
    /// No token, an unresolvable token, or a creator outside the allow-list.
    Invalid,
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn issuer(&self) -> Option<CounterpartyIdentity> {
        match self {
            ValidationOutcome::Valid(identity) => Some(*identity),
            ValidationOutcome::Invalid => None,
        }
    }
}

/// Classification handed to error callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpErrorKind {
    /// The intent was not sent by a trusted counterparty.
    UntrustedSource,
    /// The intent is trusted but the expected payload is absent.
    PayloadMissing,
    /// Any other failure while extracting the payload.
    Unclassified,
}

impl fmt::Display for OtpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OtpErrorKind::UntrustedSource => "untrusted source",
            OtpErrorKind::PayloadMissing => "payload missing",
            OtpErrorKind::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// A classified failure with its underlying cause.
///
/// `cause` is `None` exactly when `kind` is `PayloadMissing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OTP intent rejected: {kind}")]
pub struct OtpFailure {
    pub kind: OtpErrorKind,
    #[source]
    pub cause: Option<ExtractError>,
}

impl OtpFailure {
    pub fn payload_missing() -> Self {
        Self {
            kind: OtpErrorKind::PayloadMissing,
            cause: None,
        }
    }

    pub fn into_parts(self) -> (OtpErrorKind, Option<ExtractError>) {
        (self.kind, self.cause)
    }
}

impl From<ExtractError> for OtpFailure {
    fn from(error: ExtractError) -> Self {
        Self {
            kind: error.kind(),
            cause: Some(error),
        }
    }
}

/// Enabled state of a host component, such as the OTP receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentState {
    Enabled,
    Disabled,
}
