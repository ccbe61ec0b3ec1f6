//! # Attest Seal
//!
//! Confidential delivery of claims. A sealed claim can only be read by
//! the one recipient it was addressed to: the sender derives a pairwise
//! key via ECDH with the recipient's public key, and the claim travels
//! as an authenticated AES-256-GCM ciphertext.
//!
//! Sealing is orthogonal to signing. Opening an envelope yields a claim
//! that still carries its issuer signature and must still pass
//! validation.

pub mod crypter;
pub mod envelope;

pub use crypter::{SealNonce, SealingKey};
pub use envelope::{EncryptedClaimEnvelope, SealFormat};
