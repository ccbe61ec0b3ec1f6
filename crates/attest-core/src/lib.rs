//! # Attest Core
//!
//! Pure primitives for claim-based authentication: keys and their codecs,
//! the claim model, canonical signing bytes, and validation.
//!
//! This crate contains no I/O and no networking. Every operation is a
//! synchronous, CPU-bound function over caller-supplied data; keys are
//! passed explicitly and never resolved from ambient state.
//!
//! ## Key Types
//!
//! - [`Claim`] - A signed, time-bounded capability assertion
//! - [`ClaimRequest`] - The unsigned intent consumed by a signer
//! - [`EcPrivateKey`] / [`EcPublicKey`] - P-256 key material
//! - [`ClaimError`] - The closed error taxonomy for every failure mode
//!
//! ## Canonicalization
//!
//! Signatures cover a deterministic CBOR encoding of all non-signature
//! fields. See [`canonical`].

pub mod canonical;
pub mod claim;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod skew;
pub mod validation;

pub use canonical::{canonical_claim_bytes, canonical_request_bytes};
pub use claim::{
    marshal_claim, unmarshal_claim, Claim, ClaimRequest, SignatureScheme, CLAIM_TYPE,
    DEFAULT_CLAIM_TTL,
};
pub use codec::{
    compress_public_key, decompress_public_key, ec_key_from_rsa, rsa_private_from_pem,
    rsa_private_to_pem, rsa_public_from_pem, rsa_public_to_pem,
};
pub use crypto::{EcPrivateKey, EcPublicKey, EcdsaSignature, SharedKey};
pub use error::ClaimError;
pub use skew::{unix_now, within_skew, DEFAULT_CLOCK_SKEW};
pub use validation::{check_claim_any, validate_claim, validate_claim_any};
