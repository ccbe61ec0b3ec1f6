//! Claim validation: structural, temporal, and signature checks.
//!
//! Checks run in a fixed order and the first failure wins; a claim is
//! never partially accepted. `check_claim_any` always re-runs the full
//! validation before the destination and capability checks, so a caller
//! cannot hold a stale "validated" claim across the authorization step.

use std::time::Duration;

use crate::canonical::canonical_claim_bytes;
use crate::claim::{Claim, CLAIM_TYPE};
use crate::crypto::EcPublicKey;
use crate::error::ClaimError;

/// Validate a claim against a single signer key.
pub fn validate_claim(
    claim: &Claim,
    signer_key: &EcPublicKey,
    now: i64,
    skew: Duration,
) -> Result<(), ClaimError> {
    validate_claim_any(claim, std::slice::from_ref(signer_key), now, skew)
}

/// Validate a claim against a set of candidate signer keys.
///
/// The set form exists for key rotation: a claim is valid if any current
/// key verifies it. Fails with `MalformedToken` on a wrong type tag,
/// `Expired` outside the skew-adjusted validity window, and
/// `SignatureInvalid` when no key verifies the canonical bytes.
pub fn validate_claim_any(
    claim: &Claim,
    signer_keys: &[EcPublicKey],
    now: i64,
    skew: Duration,
) -> Result<(), ClaimError> {
    if claim.claim_type != CLAIM_TYPE {
        return Err(ClaimError::MalformedToken(format!(
            "unexpected claim type {:?}",
            claim.claim_type
        )));
    }

    let s = skew.as_secs() as i64;
    if now + s < claim.valid_after {
        return Err(ClaimError::Expired(format!(
            "not valid yet: claimant={}, valid_after={}, now={now}",
            claim.claimant, claim.valid_after
        )));
    }
    if now - s > claim.valid_before {
        return Err(ClaimError::Expired(format!(
            "expired: claimant={}, valid_before={}, now={now}",
            claim.claimant, claim.valid_before
        )));
    }

    let message = canonical_claim_bytes(claim);
    if signer_keys
        .iter()
        .any(|key| key.verify(&message, &claim.signature).is_ok())
    {
        Ok(())
    } else {
        Err(ClaimError::SignatureInvalid)
    }
}

/// Full authorization check: validate, then bind to a destination and a
/// required capability set.
///
/// Capability matching is exact-string set containment: the claim's
/// granted set must be a superset of `required`, order irrelevant.
pub fn check_claim_any<S: AsRef<str>>(
    claim: &Claim,
    signer_keys: &[EcPublicKey],
    destination: &str,
    required: &[S],
    now: i64,
    skew: Duration,
) -> Result<(), ClaimError> {
    validate_claim_any(claim, signer_keys, now, skew)?;

    if claim.destination != destination {
        return Err(ClaimError::WrongDestination(destination.to_string()));
    }

    for capability in required {
        if !claim.grants(capability.as_ref()) {
            return Err(ClaimError::MissingCapability(capability.as_ref().to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::SignatureScheme;
    use crate::crypto::{EcPrivateKey, EcdsaSignature};
    use crate::skew::DEFAULT_CLOCK_SKEW;

    const NOW: i64 = 1_700_000_000;

    fn signed_claim(key: &EcPrivateKey) -> Claim {
        let mut claim = Claim {
            claim_type: CLAIM_TYPE.to_string(),
            claimant: "alice".to_string(),
            destination: "bob".to_string(),
            capabilities: vec!["read".to_string()],
            valid_after: NOW - 60,
            valid_before: NOW + 3600,
            signature: EcdsaSignature::ZERO,
            signature_scheme: SignatureScheme::Sha256,
        };
        claim.signature = key.sign(&canonical_claim_bytes(&claim));
        claim
    }

    #[test]
    fn test_fresh_claim_validates() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);

        validate_claim(&claim, &key.public_key(), NOW, DEFAULT_CLOCK_SKEW).unwrap();
    }

    #[test]
    fn test_wrong_key_is_signature_invalid() {
        let key = EcPrivateKey::generate();
        let other = EcPrivateKey::generate();
        let claim = signed_claim(&key);

        assert!(matches!(
            validate_claim(&claim, &other.public_key(), NOW, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_any_of_key_set_validates() {
        let old = EcPrivateKey::generate();
        let current = EcPrivateKey::generate();
        let claim = signed_claim(&current);

        let keys = [old.public_key(), current.public_key()];
        validate_claim_any(&claim, &keys, NOW, DEFAULT_CLOCK_SKEW).unwrap();
    }

    #[test]
    fn test_tampered_field_is_signature_invalid() {
        let key = EcPrivateKey::generate();
        let mut claim = signed_claim(&key);
        claim.capabilities.push("admin".to_string());

        assert!(matches!(
            validate_claim(&claim, &key.public_key(), NOW, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_expired_claim() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);

        // Far past the window plus skew.
        let later = claim.valid_before + 120;
        assert!(matches!(
            validate_claim(&claim, &key.public_key(), later, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::Expired(_))
        ));
    }

    #[test]
    fn test_future_claim_rejected() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);

        let earlier = claim.valid_after - 120;
        assert!(matches!(
            validate_claim(&claim, &key.public_key(), earlier, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::Expired(_))
        ));
    }

    #[test]
    fn test_skew_stretches_window() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);

        // One second past expiry still passes with the default tolerance,
        // and fails with zero tolerance.
        let just_past = claim.valid_before + 1;
        validate_claim(&claim, &key.public_key(), just_past, DEFAULT_CLOCK_SKEW).unwrap();
        assert!(matches!(
            validate_claim(&claim, &key.public_key(), just_past, Duration::ZERO),
            Err(ClaimError::Expired(_))
        ));
    }

    #[test]
    fn test_wrong_claim_type_is_malformed() {
        let key = EcPrivateKey::generate();
        let mut claim = signed_claim(&key);
        claim.claim_type = "OTHER".to_string();

        assert!(matches!(
            validate_claim(&claim, &key.public_key(), NOW, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_check_destination_and_capabilities() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);
        let keys = [key.public_key()];

        check_claim_any(&claim, &keys, "bob", &["read"], NOW, DEFAULT_CLOCK_SKEW).unwrap();

        assert!(matches!(
            check_claim_any(&claim, &keys, "carol", &["read"], NOW, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::WrongDestination(d)) if d == "carol"
        ));
        assert!(matches!(
            check_claim_any(&claim, &keys, "bob", &["write"], NOW, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::MissingCapability(c)) if c == "write"
        ));
    }

    #[test]
    fn test_check_superset_order_irrelevant() {
        let key = EcPrivateKey::generate();
        let mut claim = signed_claim(&key);
        claim.capabilities = vec!["write".to_string(), "read".to_string()];
        claim.signature = key.sign(&canonical_claim_bytes(&claim));

        let keys = [key.public_key()];
        check_claim_any(&claim, &keys, "bob", &["read", "write"], NOW, DEFAULT_CLOCK_SKEW)
            .unwrap();
        check_claim_any(&claim, &keys, "bob", &["read"], NOW, DEFAULT_CLOCK_SKEW).unwrap();
        let empty: [&str; 0] = [];
        check_claim_any(&claim, &keys, "bob", &empty, NOW, DEFAULT_CLOCK_SKEW).unwrap();
    }

    #[test]
    fn test_check_revalidates() {
        let key = EcPrivateKey::generate();
        let claim = signed_claim(&key);
        let keys = [key.public_key()];

        // Destination and capabilities match, but the claim is expired at
        // this reference time; validation must still run and win.
        let later = claim.valid_before + 120;
        assert!(matches!(
            check_claim_any(&claim, &keys, "bob", &["read"], later, DEFAULT_CLOCK_SKEW),
            Err(ClaimError::Expired(_))
        ));
    }
}
