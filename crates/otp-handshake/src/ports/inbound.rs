//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the SDK.
//! Implementations must be thread-safe (`Send + Sync`).

use crate::domain::entities::ValidationOutcome;
use crate::domain::errors::{ExtractError, HandshakeError};
use crate::ports::outbound::{PackageRegistry, RequesterContext};
use otp_types::{CounterpartyIdentity, DebugSignal, Intent};

/// Builds a single handshake request without sending it.
pub trait RequestBuilderApi: Send + Sync {
    /// Build the handshake intent for `target`, embedding a freshly minted token.
    fn build(
        &self,
        ctx: &dyn RequesterContext,
        target: CounterpartyIdentity,
    ) -> Result<Intent, HandshakeError>;
}

/// Outbound half: sending handshakes and probing counterparty presence.
pub trait OtpHandshakeApi: Send + Sync {
    // =========================================================================
    // Handshake
    // =========================================================================

    /// Build and broadcast a handshake to one counterparty.
    fn send_otp_intent_to(
        &self,
        ctx: &dyn RequesterContext,
        target: CounterpartyIdentity,
    ) -> Result<Intent, HandshakeError>;

    /// Build and broadcast a handshake to every known counterparty,
    /// returning the sent intents in `CounterpartyIdentity::ALL` order.
    ///
    /// Every counterparty is attempted even if an earlier one fails.
    fn send_otp_intents(&self, ctx: &dyn RequesterContext) -> Result<Vec<Intent>, HandshakeError>;

    /// Fire-and-forget form of [`Self::send_otp_intents`].
    fn send_otp_intent_to_counterparties(
        &self,
        ctx: &dyn RequesterContext,
    ) -> Result<(), HandshakeError> {
        self.send_otp_intents(ctx).map(|_| ())
    }

    // =========================================================================
    // Presence
    // =========================================================================

    /// True if `target` has a receiver for the handshake action.
    fn is_handshake_supported_by(
        &self,
        registry: &dyn PackageRegistry,
        target: CounterpartyIdentity,
    ) -> bool;

    /// True if any known counterparty has a receiver for the handshake action.
    fn is_handshake_supported(&self, registry: &dyn PackageRegistry) -> bool {
        CounterpartyIdentity::ALL
            .into_iter()
            .any(|target| self.is_handshake_supported_by(registry, target))
    }

    fn is_counterparty_installed_by(
        &self,
        registry: &dyn PackageRegistry,
        target: CounterpartyIdentity,
    ) -> bool;

    /// True if any known counterparty is installed.
    fn is_counterparty_installed(&self, registry: &dyn PackageRegistry) -> bool {
        CounterpartyIdentity::ALL
            .into_iter()
            .any(|target| self.is_counterparty_installed_by(registry, target))
    }
}

/// Inbound half: authenticating and decoding counterparty replies.
pub trait IncomingOtpApi: Send + Sync {
    /// Check the intent's token against `allowed`.
    ///
    /// A missing token is `Ok(ValidationOutcome::Invalid)`, not an error.
    fn validate(
        &self,
        intent: &Intent,
        allowed: &[CounterpartyIdentity],
    ) -> Result<ValidationOutcome, ExtractError>;

    /// True if the intent was created by one of `allowed`. Never fails.
    ///
    /// An empty `allowed` slice trusts nobody; use
    /// [`Self::is_from_trusted_counterparty`] for the full known set.
    fn is_from_counterparty(&self, intent: &Intent, allowed: &[CounterpartyIdentity]) -> bool;

    /// True if the intent was created by any known counterparty. Never fails.
    fn is_from_trusted_counterparty(&self, intent: &Intent) -> bool {
        self.is_from_counterparty(intent, &CounterpartyIdentity::ALL)
    }

    /// Read the OTP code of a trusted intent. A trusted intent without a code
    /// yields `Ok(None)`.
    fn extract_otp_code(&self, intent: &Intent) -> Result<Option<String>, ExtractError>;

    /// Read the diagnostic pair of a trusted intent.
    fn extract_debug_signal(&self, intent: &Intent) -> Result<DebugSignal, ExtractError>;
}
