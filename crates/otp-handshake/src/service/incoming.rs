//! # Incoming Intent Service
//!
//! Authenticates counterparty replies and extracts their payload.
//!
//! ## Per-Intent Flow
//!
//! ```text
//! Received ──► TokenAbsent ────────────► on_error(UntrustedSource)
//!          ├─► TokenPresentUntrusted ──► on_error(UntrustedSource)
//!          ├─► TrustedNoPayload ───────► on_error(PayloadMissing, None)
//!          └─► TrustedWithPayload ─────► on_code / on_signal
//! ```
//!
//! Nothing is retried and nothing is remembered between intents.

use crate::domain::entities::{OtpErrorKind, OtpFailure, ValidationOutcome};
use crate::domain::errors::ExtractError;
use crate::domain::trust::match_issuer;
use crate::ports::inbound::IncomingOtpApi;
use crate::ports::outbound::TokenAuthority;
use otp_types::keys::{CALLER_INFO, CODE, OTP_ERROR_IDENTIFIER, OTP_ERROR_MESSAGE};
use otp_types::{CounterpartyIdentity, DebugSignal, Intent};
use tracing::{debug, warn};

/// Validates inbound intents against the token authority `A`.
#[derive(Debug, Clone)]
pub struct IncomingIntentHandler<A: TokenAuthority> {
    authority: A,
}

impl<A: TokenAuthority> IncomingIntentHandler<A> {
    pub fn new(authority: A) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    fn ensure_trusted(&self, intent: &Intent) -> Result<CounterpartyIdentity, ExtractError> {
        let outcome = self.validate(intent, &CounterpartyIdentity::ALL)?;
        if let Some(issuer) = outcome.issuer() {
            return Ok(issuer);
        }

        let claimed = intent
            .token_extra(CALLER_INFO)
            .map(|token| token.claimed_creator().to_string());
        warn!(claimed_issuer = ?claimed, "Rejected intent from untrusted source");
        Err(ExtractError::UntrustedSource { issuer: claimed })
    }

    // =========================================================================
    // Result-returning entry points
    // =========================================================================

    /// Resolve the OTP code, treating a missing code as a failure.
    pub fn resolve_otp_code(&self, intent: &Intent) -> Result<String, OtpFailure> {
        match self.extract_otp_code(intent)? {
            Some(code) => Ok(code),
            None => {
                debug!("Trusted intent carried no OTP code");
                Err(OtpFailure::payload_missing())
            }
        }
    }

    pub fn resolve_debug_signal(&self, intent: &Intent) -> Result<DebugSignal, OtpFailure> {
        Ok(self.extract_debug_signal(intent)?)
    }

    // =========================================================================
    // Callback entry points
    // =========================================================================

    /// Deliver the OTP code to `on_code`, or a classified failure to `on_error`.
    ///
    /// Exactly one of the callbacks runs, once, before this returns.
    pub fn process_otp_code<C, E>(&self, intent: &Intent, on_code: C, on_error: E)
    where
        C: FnOnce(String),
        E: FnOnce(OtpErrorKind, Option<ExtractError>),
    {
        dispatch(self.resolve_otp_code(intent), on_code, on_error);
    }

    /// Deliver the diagnostic pair to `on_signal`, or a classified failure to `on_error`.
    ///
    /// Exactly one of the callbacks runs, once, before this returns.
    pub fn process_otp_debug_signals<S, E>(&self, intent: &Intent, on_signal: S, on_error: E)
    where
        S: FnOnce(DebugSignal),
        E: FnOnce(OtpErrorKind, Option<ExtractError>),
    {
        dispatch(self.resolve_debug_signal(intent), on_signal, on_error);
    }

    /// Same as [`Self::process_otp_code`] for an intent still in wire form.
    /// A decode failure is reported as `Unclassified`.
    pub fn process_otp_code_json<C, E>(&self, raw: &str, on_code: C, on_error: E)
    where
        C: FnOnce(String),
        E: FnOnce(OtpErrorKind, Option<ExtractError>),
    {
        let result = Intent::from_json(raw)
            .map_err(|e| OtpFailure::from(ExtractError::from(e)))
            .and_then(|intent| self.resolve_otp_code(&intent));
        dispatch(result, on_code, on_error);
    }

    pub fn process_otp_debug_signals_json<S, E>(&self, raw: &str, on_signal: S, on_error: E)
    where
        S: FnOnce(DebugSignal),
        E: FnOnce(OtpErrorKind, Option<ExtractError>),
    {
        let result = Intent::from_json(raw)
            .map_err(|e| OtpFailure::from(ExtractError::from(e)))
            .and_then(|intent| self.resolve_debug_signal(&intent));
        dispatch(result, on_signal, on_error);
    }
}

fn dispatch<T, S, E>(result: Result<T, OtpFailure>, on_success: S, on_error: E)
where
    S: FnOnce(T),
    E: FnOnce(OtpErrorKind, Option<ExtractError>),
{
    match result {
        Ok(value) => on_success(value),
        Err(failure) => {
            debug!(kind = %failure.kind, "OTP intent failed");
            let (kind, cause) = failure.into_parts();
            on_error(kind, cause);
        }
    }
}

impl<A: TokenAuthority> IncomingOtpApi for IncomingIntentHandler<A> {
    fn validate(
        &self,
        intent: &Intent,
        allowed: &[CounterpartyIdentity],
    ) -> Result<ValidationOutcome, ExtractError> {
        let Some(token) = intent.token_extra(CALLER_INFO) else {
            debug!("Intent carries no capability token");
            return Ok(ValidationOutcome::Invalid);
        };

        let creator = self.authority.creator_package(token)?;
        Ok(match_issuer(creator.as_deref(), allowed))
    }

    fn is_from_counterparty(&self, intent: &Intent, allowed: &[CounterpartyIdentity]) -> bool {
        match self.validate(intent, allowed) {
            Ok(outcome) => outcome.is_valid(),
            Err(e) => {
                warn!(error = %e, "Token authority lookup failed; treating intent as untrusted");
                false
            }
        }
    }

    fn extract_otp_code(&self, intent: &Intent) -> Result<Option<String>, ExtractError> {
        let issuer = self.ensure_trusted(intent)?;
        let code = intent.string_extra(CODE)?.map(str::to_string);

        debug!(issuer = %issuer, has_code = code.is_some(), "OTP code extracted");
        Ok(code)
    }

    fn extract_debug_signal(&self, intent: &Intent) -> Result<DebugSignal, ExtractError> {
        let issuer = self.ensure_trusted(intent)?;
        let signal = DebugSignal::new(
            intent.string_extra(OTP_ERROR_IDENTIFIER)?.map(str::to_string),
            intent.string_extra(OTP_ERROR_MESSAGE)?.map(str::to_string),
        );

        debug!(issuer = %issuer, "Debug signal extracted");
        Ok(signal)
    }
}
