//! # Forged Sender Exploits
//!
//! A malicious app on the device broadcasts a reply to the host that looks
//! like it came from a counterparty, hoping the host autofills its code.
//!
//! ## Attack Vectors:
//!
//! 1. **Foreign Issuer**: Genuine token, wrong creator package
//! 2. **Forged Token**: Self-built token claiming a counterparty creator
//! 3. **Lookalike Package**: Case and whitespace variants of a trusted name
//! 4. **Slot Confusion**: Wrong value type in the caller-info slot
//! 5. **Replay**: The host's own handshake token sent back to it

#[cfg(test)]
mod tests {
    use otp_handshake::{
        ExtractError, HmacTokenAuthority, InMemoryPlatform, IncomingIntentHandler, IncomingOtpApi,
        OtpErrorKind, OtpHandler, OtpHandshakeApi, TokenAuthority, TokenIssuer, ValidationOutcome,
    };
    use otp_types::keys::{CALLER_INFO, CODE, OTP_ERROR_IDENTIFIER};
    use otp_types::{CapabilityToken, CounterpartyIdentity, Intent};
    use rand::RngCore;
    use uuid::Uuid;

    use crate::{Device, HOST_PACKAGE};

    /// Reply carrying `token` in the caller-info slot and a code payload.
    fn forged_reply(token: CapabilityToken) -> Intent {
        let mut intent = Intent::new().with_package(HOST_PACKAGE);
        intent.put_token(CALLER_INFO, token);
        intent.put_string(CODE, "666666");
        intent
    }

    /// Run the code flow and return the single error it reports.
    fn expect_rejected(device: &Device, intent: &Intent) -> (OtpErrorKind, Option<ExtractError>) {
        let incoming = IncomingIntentHandler::new(device.authority.clone());
        let mut errors = Vec::new();
        incoming.process_otp_code(
            intent,
            |code| panic!("forged reply leaked code {code}"),
            |kind, cause| errors.push((kind, cause)),
        );
        assert_eq!(errors.len(), 1);
        errors.remove(0)
    }

    fn random_seal() -> [u8; 32] {
        let mut seal = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seal);
        seal
    }

    // =============================================================================
    // ATTACK 1: FOREIGN ISSUER
    // =============================================================================

    #[test]
    fn test_genuine_token_from_untrusted_app_rejected() {
        let device = Device::new();
        let attacker = device.authority.mint_for("com.not.trusted").unwrap();

        let (kind, cause) = expect_rejected(&device, &forged_reply(attacker));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
        assert_eq!(
            cause,
            Some(ExtractError::UntrustedSource {
                issuer: Some("com.not.trusted".to_string())
            })
        );
    }

    #[test]
    fn test_untrusted_app_cannot_mint_as_counterparty() {
        // An app on the same device only ever gets tokens naming itself.
        let device = Device::new();
        let evil = InMemoryPlatform::new("com.evil.app", device.authority.clone());
        let token = evil.mint().unwrap();
        assert_eq!(token.claimed_creator(), "com.evil.app");

        let intent = forged_reply(token);
        let incoming = IncomingIntentHandler::new(device.authority.clone());
        assert!(!incoming.is_from_trusted_counterparty(&intent));
        assert_eq!(
            incoming.extract_otp_code(&intent),
            Err(ExtractError::UntrustedSource {
                issuer: Some("com.evil.app".to_string())
            })
        );
    }

    #[test]
    fn test_empty_issuer_rejected() {
        let device = Device::new();
        let token = device.authority.mint_for("").unwrap();

        let (kind, _) = expect_rejected(&device, &forged_reply(token));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
    }

    #[test]
    fn test_debug_signal_from_untrusted_app_rejected() {
        let device = Device::new();
        let mut intent = forged_reply(device.authority.mint_for("com.not.trusted").unwrap());
        intent.put_string(OTP_ERROR_IDENTIFIER, "spoofed");

        let incoming = IncomingIntentHandler::new(device.authority.clone());
        let err = incoming.resolve_debug_signal(&intent).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::UntrustedSource);
    }

    // =============================================================================
    // ATTACK 2: FORGED TOKEN
    // =============================================================================

    #[test]
    fn test_zero_seal_claiming_consumer_rejected() {
        let device = Device::new();
        let token = CapabilityToken::from_parts(
            Uuid::new_v4(),
            CounterpartyIdentity::Consumer.package_name(),
            [0u8; 32],
        );

        let incoming = IncomingIntentHandler::new(device.authority.clone());
        assert_eq!(
            incoming.validate(&forged_reply(token.clone()), &CounterpartyIdentity::ALL),
            Ok(ValidationOutcome::Invalid)
        );

        let (kind, cause) = expect_rejected(&device, &forged_reply(token));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
        // The claimed creator is reported, but was never attested.
        assert_eq!(
            cause,
            Some(ExtractError::UntrustedSource {
                issuer: Some("com.whatsapp".to_string())
            })
        );
    }

    #[test]
    fn test_random_seals_rejected() {
        let device = Device::new();
        let incoming = IncomingIntentHandler::new(device.authority.clone());

        for identity in CounterpartyIdentity::ALL {
            for _ in 0..32 {
                let token = CapabilityToken::from_parts(
                    Uuid::new_v4(),
                    identity.package_name(),
                    random_seal(),
                );
                assert!(!incoming.is_from_trusted_counterparty(&forged_reply(token)));
            }
        }
    }

    #[test]
    fn test_swapped_creator_breaks_seal() {
        // Take a genuine attacker token and relabel it as the consumer app.
        let device = Device::new();
        let genuine = device.authority.mint_for("com.not.trusted").unwrap();
        let relabelled = CapabilityToken::from_parts(
            genuine.id(),
            CounterpartyIdentity::Consumer.package_name(),
            *genuine.seal(),
        );

        let (kind, _) = expect_rejected(&device, &forged_reply(relabelled));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
    }

    #[test]
    fn test_swapped_id_breaks_seal() {
        let device = Device::new();
        let genuine = device.consumer.mint().unwrap();
        let moved = CapabilityToken::from_parts(
            Uuid::new_v4(),
            genuine.claimed_creator(),
            *genuine.seal(),
        );

        let (kind, _) = expect_rejected(&device, &forged_reply(moved));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
    }

    #[test]
    fn test_token_from_other_device_rejected() {
        // Attested by a different platform secret, so this device cannot vouch for it.
        let device = Device::new();
        let elsewhere = HmacTokenAuthority::random();
        let token = elsewhere
            .mint_for(CounterpartyIdentity::Business.package_name())
            .unwrap();

        assert_eq!(device.authority.creator_package(&token), Ok(None));
        let (kind, _) = expect_rejected(&device, &forged_reply(token));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
    }

    // =============================================================================
    // ATTACK 3: LOOKALIKE PACKAGE
    // =============================================================================

    #[test]
    fn test_lookalike_packages_rejected() {
        let device = Device::new();
        let incoming = IncomingIntentHandler::new(device.authority.clone());

        for lookalike in [
            "COM.WHATSAPP",
            "com.WhatsApp",
            "com.whatsapp ",
            " com.whatsapp",
            "com.whatsapp.w4b.evil",
            "com.whatsap",
            "com.whatsapp\0",
        ] {
            let token = device.authority.mint_for(lookalike).unwrap();
            let intent = forged_reply(token);
            assert!(
                !incoming.is_from_trusted_counterparty(&intent),
                "{lookalike:?} accepted"
            );
            assert!(incoming.extract_otp_code(&intent).is_err());
        }
    }

    #[test]
    fn test_trusted_counterparty_outside_allow_list_rejected() {
        let device = Device::new();
        let reply = device.reply_from(CounterpartyIdentity::Business);

        let incoming = IncomingIntentHandler::new(device.authority.clone());
        assert!(!incoming.is_from_counterparty(&reply, &[CounterpartyIdentity::Consumer]));
        assert!(!incoming.is_from_counterparty(&reply, &[]));
    }

    // =============================================================================
    // ATTACK 4: SLOT CONFUSION
    // =============================================================================

    #[test]
    fn test_string_in_caller_info_slot_rejected() {
        let device = Device::new();
        let mut intent = Intent::new().with_package(HOST_PACKAGE);
        intent.put_string(CALLER_INFO, CounterpartyIdentity::Consumer.package_name());
        intent.put_string(CODE, "666666");

        let (kind, cause) = expect_rejected(&device, &intent);
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
        assert_eq!(cause, Some(ExtractError::UntrustedSource { issuer: None }));
    }

    #[test]
    fn test_missing_caller_info_rejected() {
        let device = Device::new();
        let mut intent = Intent::new().with_package(HOST_PACKAGE);
        intent.put_string(CODE, "666666");

        let (kind, _) = expect_rejected(&device, &intent);
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
    }

    #[test]
    fn test_forged_json_token_rejected() {
        let device = Device::new();
        let attacker = device.authority.mint_for("com.not.trusted").unwrap();
        let wire = forged_reply(attacker).to_json().unwrap();

        // Rewrite the claimed creator on the wire; the seal no longer matches.
        let rewritten = wire.replace("com.not.trusted", "com.whatsapp");
        assert!(serde_json::from_str::<serde_json::Value>(&rewritten).is_ok());

        let incoming = IncomingIntentHandler::new(device.authority.clone());
        let mut errors = Vec::new();
        incoming.process_otp_code_json(
            &rewritten,
            |code| panic!("forged reply leaked code {code}"),
            |kind, _| errors.push(kind),
        );
        assert_eq!(errors, vec![OtpErrorKind::UntrustedSource]);
    }

    // =============================================================================
    // ATTACK 5: REPLAY
    // =============================================================================

    #[test]
    fn test_host_handshake_token_replayed_rejected() {
        let device = Device::new();
        let handshake = OtpHandler::new()
            .send_otp_intent_to(&device.host, CounterpartyIdentity::Consumer)
            .unwrap();
        let token = handshake.token_extra(CALLER_INFO).unwrap().clone();

        let (kind, cause) = expect_rejected(&device, &forged_reply(token));
        assert_eq!(kind, OtpErrorKind::UntrustedSource);
        assert_eq!(
            cause,
            Some(ExtractError::UntrustedSource {
                issuer: Some(HOST_PACKAGE.to_string())
            })
        );
    }

    #[test]
    fn test_counterparty_token_reused_still_trusted() {
        // Tokens carry no expiry: a genuine counterparty token stays genuine.
        let device = Device::new();
        let token = device.business.mint().unwrap();

        let incoming = IncomingIntentHandler::new(device.authority.clone());
        for _ in 0..3 {
            assert!(incoming.is_from_trusted_counterparty(&forged_reply(token.clone())));
        }
    }
}
