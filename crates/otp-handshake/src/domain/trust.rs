//! # Issuer Matching
//!
//! Decides whether a resolved token creator belongs to an allow-list.
//! Exact, case-sensitive string equality only.

use crate::domain::entities::ValidationOutcome;
use otp_types::CounterpartyIdentity;

/// Matches a resolved creator package against `allowed`.
///
/// `creator` is `None` when the intent carried no token or the token authority
/// could not vouch for it. An empty `allowed` slice trusts nobody.
pub fn match_issuer(creator: Option<&str>, allowed: &[CounterpartyIdentity]) -> ValidationOutcome {
    let Some(creator) = creator else {
        return ValidationOutcome::Invalid;
    };

    allowed
        .iter()
        .copied()
        .find(|identity| identity.package_name() == creator)
        .map_or(ValidationOutcome::Invalid, ValidationOutcome::Valid)
}
