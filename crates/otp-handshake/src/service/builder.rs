//! # Handshake Request Builder
//!
//! Builds the outbound `OTP_REQUESTED` intent for one counterparty.

use crate::config::HandshakeConfig;
use crate::domain::errors::HandshakeError;
use crate::ports::inbound::RequestBuilderApi;
use crate::ports::outbound::RequesterContext;
use otp_types::keys::{CALLER_INFO, OTP_REQUESTED_ACTION, SDK_VERSION};
use otp_types::{CounterpartyIdentity, Intent};
use tracing::{debug, info};

/// Builds handshake intents. Holds only read-only configuration.
#[derive(Debug, Clone, Default)]
pub struct IntentBuilder {
    config: HandshakeConfig,
}

impl IntentBuilder {
    /// Create a builder with the default configuration (version reporting on).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HandshakeConfig) -> Self {
        Self { config }
    }

    /// Create a builder with version reporting toggled.
    pub fn with_send_sdk_version(send_sdk_version: bool) -> Self {
        Self::with_config(HandshakeConfig::with_send_sdk_version(send_sdk_version))
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Build for a counterparty given by package name.
    ///
    /// # Errors
    /// * `HandshakeError::InvalidArgument` - `package` is not a known counterparty
    pub fn build_for_package(
        &self,
        ctx: &dyn RequesterContext,
        package: &str,
    ) -> Result<Intent, HandshakeError> {
        let target: CounterpartyIdentity = package
            .parse()
            .map_err(|e| HandshakeError::InvalidArgument(format!("{e}")))?;
        self.build(ctx, target)
    }

    fn log_receivers(&self, ctx: &dyn RequesterContext, package: &str) {
        if !ctx.is_package_installed(package) {
            info!(
                target_package = package,
                "Package not found. Is it declared in the host's package visibility queries?"
            );
            return;
        }
        for receiver in ctx.broadcast_receivers(package, OTP_REQUESTED_ACTION) {
            debug!(target_package = package, receiver = %receiver, "Handshake receiver resolved");
        }
    }
}

impl RequestBuilderApi for IntentBuilder {
    /// Build the handshake intent for `target`.
    ///
    /// # Errors
    /// * `HandshakeError::InvalidArgument` - the requester has no package identity
    /// * `HandshakeError::Platform` - the token authority refused to mint
    fn build(
        &self,
        ctx: &dyn RequesterContext,
        target: CounterpartyIdentity,
    ) -> Result<Intent, HandshakeError> {
        let requester = ctx.package_name();
        if requester.trim().is_empty() {
            return Err(HandshakeError::InvalidArgument(
                "requester package name cannot be empty".to_string(),
            ));
        }

        let package = target.package_name();
        let mut intent = Intent::new()
            .with_package(package)
            .with_action(OTP_REQUESTED_ACTION);

        if self.config.debug_diagnostics {
            self.log_receivers(ctx, package);
        }

        let token = ctx.mint()?;
        intent.put_token(CALLER_INFO, token);

        if self.config.send_sdk_version {
            intent.put_string(SDK_VERSION, self.config.resolved_sdk_version());
        }

        debug!(
            target_package = package,
            requester = requester,
            "Handshake intent built"
        );
        Ok(intent)
    }
}
