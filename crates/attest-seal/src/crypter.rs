//! Symmetric sealing primitives.
//!
//! The pairwise key is derived from an ECDH shared secret with
//! HKDF-SHA-256, then used with AES-256-GCM. Both sides derive the same
//! key from their own private key and the peer's public key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use attest_core::{ClaimError, EcPrivateKey, EcPublicKey};

/// Domain separation for the claim-sealing key derivation.
const SEAL_INFO: &[u8] = b"attest-seal-v1/aes256gcm";

/// A 256-bit AES-GCM key derived for one sender/recipient pair.
#[derive(Clone)]
pub struct SealingKey([u8; 32]);

impl SealingKey {
    /// Derive the pairwise sealing key from one side's private key and
    /// the other side's public key.
    pub fn derive(private: &EcPrivateKey, public: &EcPublicKey) -> Result<Self, ClaimError> {
        let shared = private.diffie_hellman(public);
        let kdf = Hkdf::<Sha256>::new(None, shared.as_bytes());

        let mut key = [0u8; 32];
        kdf.expand(SEAL_INFO, &mut key)
            .map_err(|e| ClaimError::EncryptionFailed(e.to_string()))?;
        Ok(Self(key))
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encrypt plaintext under this key and nonce.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &SealNonce) -> Result<Vec<u8>, ClaimError> {
        let cipher = Aes256Gcm::new_from_slice(&self.0)
            .map_err(|e| ClaimError::EncryptionFailed(e.to_string()))?;
        cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| ClaimError::EncryptionFailed(e.to_string()))
    }

    /// Decrypt ciphertext under this key and nonce.
    ///
    /// A wrong key or tampered ciphertext fails the GCM tag check; this
    /// never yields garbage plaintext.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &SealNonce) -> Result<Vec<u8>, ClaimError> {
        let cipher = Aes256Gcm::new_from_slice(&self.0)
            .map_err(|e| ClaimError::DecryptionFailed(e.to_string()))?;
        cipher
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|e| ClaimError::DecryptionFailed(e.to_string()))
    }
}

/// A 96-bit AES-GCM nonce, fresh per envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealNonce(pub [u8; 12]);

impl SealNonce {
    /// Generate a new random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }
}
