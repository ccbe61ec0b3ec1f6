//! Proptest generators for property-based testing.

use proptest::prelude::*;
use std::time::Duration;

use attest::sign_claim;
use attest_core::{Claim, ClaimRequest, EcPrivateKey, EcPublicKey, EcdsaSignature};

/// Generate a private key from a random seed.
pub fn private_key() -> impl Strategy<Value = EcPrivateKey> {
    any::<[u8; 32]>().prop_map(|seed| {
        let mut scalar = seed;
        scalar[0] &= 0x7f;
        scalar[31] |= 1;
        EcPrivateKey::from_bytes(&scalar).expect("masked seed is a valid scalar")
    })
}

/// Generate a public key.
pub fn public_key() -> impl Strategy<Value = EcPublicKey> {
    private_key().prop_map(|key| key.public_key())
}

/// Generate a raw 64-byte signature (not necessarily valid).
pub fn signature_bytes() -> impl Strategy<Value = EcdsaSignature> {
    any::<[u8; 64]>().prop_map(EcdsaSignature::from_bytes)
}

/// Generate an entity name.
pub fn entity_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate a capability string.
pub fn capability() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9:._-]{0,23}".prop_map(String::from)
}

/// Generate a capability list.
pub fn capabilities(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(capability(), 0..=max)
}

/// Generate a plausible Unix timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    1_000_000_000i64..=4_000_000_000i64
}

/// Parameters for generating a signed claim.
#[derive(Debug, Clone)]
pub struct ClaimParams {
    pub signer_seed: [u8; 32],
    pub claimant: String,
    pub destination: String,
    pub capabilities: Vec<String>,
    pub valid_after: i64,
    pub lifetime: u32,
}

impl Arbitrary for ClaimParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(),
            entity_name(),
            entity_name(),
            capabilities(8),
            timestamp(),
            1u32..=86_400u32,
        )
            .prop_map(
                |(signer_seed, claimant, destination, capabilities, valid_after, lifetime)| {
                    ClaimParams {
                        signer_seed,
                        claimant,
                        destination,
                        capabilities,
                        valid_after,
                        lifetime,
                    }
                },
            )
            .boxed()
    }
}

impl ClaimParams {
    /// The deterministic signer key for these parameters.
    pub fn signer(&self) -> EcPrivateKey {
        let mut scalar = self.signer_seed;
        scalar[0] &= 0x7f;
        scalar[31] |= 1;
        EcPrivateKey::from_bytes(&scalar).expect("masked seed is a valid scalar")
    }
}

/// Build a signed claim from parameters.
pub fn claim_from_params(params: &ClaimParams) -> Claim {
    let mut request = ClaimRequest::new(
        params.claimant.clone(),
        params.destination.clone(),
        params.capabilities.clone(),
        Duration::from_secs(params.lifetime as u64),
    );
    request.valid_after = params.valid_after;
    request.valid_before = params.valid_after + params.lifetime as i64;

    sign_claim(&request, Some(&params.signer())).expect("signing key present")
}
