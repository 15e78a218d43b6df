//! # OTP Handshake Service
//!
//! Application service that implements `OtpHandshakeApi`: sends handshakes to
//! the counterparties and answers presence queries.
//!
//! A handshake announces that the host is waiting for a code. The embedded
//! token lets the counterparty check the host's package against the package
//! configured in its authentication message template; autofill is then
//! enabled on the counterparty side.

use crate::domain::errors::HandshakeError;
use crate::ports::inbound::{OtpHandshakeApi, RequestBuilderApi};
use crate::ports::outbound::{PackageRegistry, RequesterContext};
use crate::service::builder::IntentBuilder;
use otp_types::keys::OTP_REQUESTED_ACTION;
use otp_types::{CounterpartyIdentity, Intent};
use tracing::{info, warn};

/// Sends handshakes built by `B`.
#[derive(Debug, Clone, Default)]
pub struct OtpHandler<B: RequestBuilderApi = IntentBuilder> {
    builder: B,
}

impl OtpHandler<IntentBuilder> {
    /// Create a handler with the default builder (version reporting on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler whose builder reports the SDK version or not.
    pub fn with_send_sdk_version(send_sdk_version: bool) -> Self {
        Self::with_builder(IntentBuilder::with_send_sdk_version(send_sdk_version))
    }
}

impl<B: RequestBuilderApi> OtpHandler<B> {
    /// Create a handler around a caller-supplied builder.
    pub fn with_builder(builder: B) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }
}

impl<B: RequestBuilderApi> OtpHandshakeApi for OtpHandler<B> {
    fn send_otp_intent_to(
        &self,
        ctx: &dyn RequesterContext,
        target: CounterpartyIdentity,
    ) -> Result<Intent, HandshakeError> {
        let intent = self.builder.build(ctx, target)?;
        ctx.send_broadcast(&intent)?;

        info!(target_package = target.package_name(), "Handshake sent");
        Ok(intent)
    }

    /// Sends to every known counterparty regardless of installation status.
    ///
    /// A failure for one counterparty does not stop the others; the first
    /// failure is returned once all have been attempted.
    fn send_otp_intents(&self, ctx: &dyn RequesterContext) -> Result<Vec<Intent>, HandshakeError> {
        let mut sent = Vec::with_capacity(CounterpartyIdentity::ALL.len());
        let mut first_error = None;

        for target in CounterpartyIdentity::ALL {
            match self.send_otp_intent_to(ctx, target) {
                Ok(intent) => sent.push(intent),
                Err(e) => {
                    warn!(target_package = target.package_name(), error = %e, "Handshake failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(sent),
        }
    }

    /// Requires the counterparty packages to be visible to the host.
    fn is_handshake_supported_by(
        &self,
        registry: &dyn PackageRegistry,
        target: CounterpartyIdentity,
    ) -> bool {
        !registry
            .broadcast_receivers(target.package_name(), OTP_REQUESTED_ACTION)
            .is_empty()
    }

    fn is_counterparty_installed_by(
        &self,
        registry: &dyn PackageRegistry,
        target: CounterpartyIdentity,
    ) -> bool {
        registry.is_package_installed(target.package_name())
    }
}
