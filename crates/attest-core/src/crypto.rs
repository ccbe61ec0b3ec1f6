//! Elliptic-curve key and signature types.
//!
//! Wraps P-256 ECDSA signing and ECDH key agreement with strong types.
//! Signatures are SHA-256 ECDSA in fixed-width 64-byte `r || s` form.

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ClaimError;

/// A P-256 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EcPublicKey(PublicKey);

impl EcPublicKey {
    /// Parse from SEC1 bytes (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, ClaimError> {
        let key = PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| ClaimError::MalformedKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// SEC1 compressed encoding (33 bytes: parity prefix plus x-coordinate).
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Verify a signature over the SHA-256 hash of `message`.
    pub fn verify(&self, message: &[u8], signature: &EcdsaSignature) -> Result<(), ClaimError> {
        let sig =
            Signature::from_slice(&signature.0).map_err(|_| ClaimError::SignatureInvalid)?;
        VerifyingKey::from(&self.0)
            .verify(message, &sig)
            .map_err(|_| ClaimError::SignatureInvalid)
    }

    pub(crate) fn inner(&self) -> &PublicKey {
        &self.0
    }

    pub(crate) fn from_inner(key: PublicKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for EcPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(self.to_compressed_bytes());
        write!(f, "EcPublicKey({})", &hex[..16])
    }
}

/// A P-256 private key, used for both ECDSA signing and ECDH agreement.
///
/// Never serialized, never logged. The Debug impl prints only the
/// corresponding public key.
#[derive(Clone)]
pub struct EcPrivateKey(SecretKey);

impl EcPrivateKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        Self(SecretKey::random(&mut rand::thread_rng()))
    }

    /// Create from a 32-byte big-endian scalar.
    ///
    /// Fails if the scalar is zero or not less than the group order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, ClaimError> {
        let key = SecretKey::from_slice(bytes)
            .map_err(|e| ClaimError::MalformedKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// Derive the public key.
    pub fn public_key(&self) -> EcPublicKey {
        EcPublicKey(self.0.public_key())
    }

    /// ECDSA-sign the SHA-256 hash of `message`.
    pub fn sign(&self, message: &[u8]) -> EcdsaSignature {
        let sig: Signature = SigningKey::from(&self.0).sign(message);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&sig.to_bytes());
        EcdsaSignature(bytes)
    }

    /// ECDH key agreement with a peer's public key.
    ///
    /// Returns the raw shared field element; callers derive cipher keys
    /// from it with a KDF before use.
    pub fn diffie_hellman(&self, peer: &EcPublicKey) -> SharedKey {
        let shared =
            p256::ecdh::diffie_hellman(self.0.to_nonzero_scalar(), peer.0.as_affine());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(shared.raw_secret_bytes());
        SharedKey(bytes)
    }

    pub(crate) fn from_inner(key: SecretKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcPrivateKey({:?})", self.public_key())
    }
}

/// The raw 32-byte secret shared between two P-256 keys.
#[derive(Clone)]
pub struct SharedKey([u8; 32]);

impl SharedKey {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// A 64-byte ECDSA signature (`r || s`, each zero-padded to 32 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignature(pub [u8; 64]);

impl EcdsaSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// The zero signature (invalid, used as a pre-signing placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaSignature({}...)", &hex::encode(&self.0[..8]))
    }
}

impl AsRef<[u8]> for EcdsaSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// On the wire a signature is base64 text, matching the token's JSON form.
impl Serialize for EcdsaSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        serializer.serialize_str(&STANDARD.encode(self.0))
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        use serde::de::Error;

        let text = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(&text).map_err(D::Error::custom)?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| D::Error::custom("signature must be 64 bytes"))?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let key = EcPrivateKey::generate();
        let message = b"hello world";
        let signature = key.sign(message);

        key.public_key()
            .verify(message, &signature)
            .expect("valid signature should verify");

        let tampered = b"hello worlD";
        assert!(key.public_key().verify(tampered, &signature).is_err());
    }

    #[test]
    fn test_wrong_key_fails_verify() {
        let k1 = EcPrivateKey::generate();
        let k2 = EcPrivateKey::generate();
        let signature = k1.sign(b"message");

        assert!(matches!(
            k2.public_key().verify(b"message", &signature),
            Err(ClaimError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_deterministic_from_bytes() {
        let seed = [0x42u8; 32];
        let k1 = EcPrivateKey::from_bytes(&seed).unwrap();
        let k2 = EcPrivateKey::from_bytes(&seed).unwrap();
        assert_eq!(k1.public_key(), k2.public_key());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert!(EcPrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_diffie_hellman_agrees() {
        let alice = EcPrivateKey::generate();
        let bob = EcPrivateKey::generate();

        let ab = alice.diffie_hellman(&bob.public_key());
        let ba = bob.diffie_hellman(&alice.public_key());
        assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    #[test]
    fn test_signature_serde_roundtrip() {
        let key = EcPrivateKey::generate();
        let sig = key.sign(b"data");

        let json = serde_json::to_string(&sig).unwrap();
        let back: EcdsaSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }

    #[test]
    fn test_signature_wrong_length_rejected() {
        // 32 bytes of base64, not 64
        let json = "\"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=\"";
        assert!(serde_json::from_str::<EcdsaSignature>(json).is_err());
    }
}
