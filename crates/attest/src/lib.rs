//! # Attest
//!
//! Claim-based authentication built on signed, time-bounded capability
//! assertions.
//!
//! An authority issues a [`Claim`] saying that `claimant` may present
//! the listed capabilities to `destination` until the claim expires. The
//! claim travels as a compact token; the receiving side verifies the
//! authority's signature through a [`KeyDirectory`] and then checks the
//! destination and capability bindings. Claims can additionally be
//! sealed so only the addressed recipient can read them.
//!
//! ## Usage
//!
//! ```rust
//! use attest::{sign_claim, InMemoryDirectory, Verifier};
//! use attest::core::{marshal_claim, ClaimRequest, EcPrivateKey, DEFAULT_CLAIM_TTL};
//!
//! let authority = EcPrivateKey::generate();
//!
//! // Issue a claim for alice to present to bob.
//! let request = ClaimRequest::new("alice", "bob", vec!["read".into()], DEFAULT_CLAIM_TTL);
//! let claim = sign_claim(&request, Some(&authority)).unwrap();
//! let token = marshal_claim(&claim).unwrap();
//!
//! // Bob trusts alice's authority key and checks the token.
//! let mut directory = InMemoryDirectory::new();
//! directory.insert("alice", authority.public_key());
//! let verifier = Verifier::new(directory);
//! verifier.check(&token, "bob", &["read"]).unwrap();
//! ```
//!
//! ## Re-exports
//!
//! - `attest::core` - claim model, keys, codecs, validation
//! - `attest::seal` - recipient-addressed encryption envelopes

pub mod directory;
pub mod signer;
pub mod verifier;

// Re-export component crates
pub use attest_core as core;
pub use attest_seal as seal;

pub use directory::{InMemoryDirectory, KeyDirectory};
pub use signer::{sign_claim, sign_request, verify_request};
pub use verifier::Verifier;

// Re-export commonly used core types
pub use attest_core::{
    Claim, ClaimError, ClaimRequest, EcPrivateKey, EcPublicKey, EcdsaSignature,
};
pub use attest_seal::EncryptedClaimEnvelope;
