//! Claim issuance.
//!
//! A signing authority turns a [`ClaimRequest`] into a signed [`Claim`].
//! Requesters may authenticate the request itself by signing its
//! canonical bytes; the authority checks that signature and a freshness
//! gate before issuing.

use std::time::Duration;

use attest_core::{
    canonical_claim_bytes, canonical_request_bytes, within_skew, Claim, ClaimError, ClaimRequest,
    EcPrivateKey, EcPublicKey, SignatureScheme, CLAIM_TYPE,
};

/// Issue a signed claim for a request.
///
/// The issued claim copies the request's parties, capabilities, and
/// validity window verbatim; the signature covers all of them.
pub fn sign_claim(
    request: &ClaimRequest,
    signing_key: Option<&EcPrivateKey>,
) -> Result<Claim, ClaimError> {
    let signing_key = signing_key.ok_or(ClaimError::SigningKeyRequired)?;

    let mut claim = Claim {
        claim_type: CLAIM_TYPE.to_string(),
        claimant: request.claimant.clone(),
        destination: request.destination.clone(),
        capabilities: request.capabilities.clone(),
        valid_after: request.valid_after,
        valid_before: request.valid_before,
        signature: attest_core::EcdsaSignature::ZERO,
        signature_scheme: SignatureScheme::Sha256,
    };
    claim.signature = signing_key.sign(&canonical_claim_bytes(&claim));

    tracing::debug!(
        claimant = %claim.claimant,
        destination = %claim.destination,
        valid_before = claim.valid_before,
        "issued claim"
    );
    Ok(claim)
}

/// Sign a request with the requester's own key before submitting it.
pub fn sign_request(
    request: &mut ClaimRequest,
    requester_key: &EcPrivateKey,
) -> Result<(), ClaimError> {
    request.signature = Some(requester_key.sign(&canonical_request_bytes(request)));
    Ok(())
}

/// Authenticate a submitted request: freshness, then requester signature.
///
/// A request is fresh when its start time is within `skew` of `now` on
/// either side; a stale capture cannot be replayed later to mint a new
/// claim.
pub fn verify_request(
    request: &ClaimRequest,
    requester_key: &EcPublicKey,
    now: i64,
    skew: Duration,
) -> Result<(), ClaimError> {
    if !within_skew(request.valid_after, now, skew) {
        return Err(ClaimError::Expired(format!(
            "request not fresh: ctime={}, now={now}",
            request.valid_after
        )));
    }

    let signature = request
        .signature
        .as_ref()
        .ok_or(ClaimError::SignatureInvalid)?;
    requester_key.verify(&canonical_request_bytes(request), signature)
}
