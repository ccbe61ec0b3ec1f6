//! Recipient-addressed claim envelopes.
//!
//! An envelope carries a claim that only the addressed recipient can
//! open. The sender's name travels in cleartext so the recipient knows
//! whose public key to combine with its own private key; the claim
//! itself is sealed under the pairwise AES-256-GCM key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use attest_core::{Claim, ClaimError, EcPrivateKey, EcPublicKey};

use crate::crypter::{SealNonce, SealingKey};

/// Cipher suite tag, so the wire form can evolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealFormat {
    /// ECDH over P-256, HKDF-SHA-256, AES-256-GCM.
    #[serde(rename = "aes256gcm")]
    Aes256Gcm,
}

/// A sealed claim addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedClaimEnvelope {
    /// Cipher suite the payload was sealed with.
    pub format: SealFormat,

    /// Name of the sealing entity, in cleartext.
    pub sender: String,

    /// Fresh nonce for this envelope.
    pub nonce: SealNonce,

    /// AES-GCM ciphertext of the claim's JSON encoding.
    pub ciphertext: Vec<u8>,
}

impl EncryptedClaimEnvelope {
    /// Seal a claim for one recipient.
    ///
    /// Both keys are required; each absence reports its own error so the
    /// caller knows which side of the pair is missing.
    pub fn seal(
        claim: &Claim,
        sender: &str,
        sender_key: Option<&EcPrivateKey>,
        recipient_key: Option<&EcPublicKey>,
    ) -> Result<Self, ClaimError> {
        let sender_key = sender_key.ok_or(ClaimError::PrivateKeyRequired)?;
        let recipient_key = recipient_key.ok_or(ClaimError::PublicKeyRequired)?;

        let plaintext = serde_json::to_vec(claim)
            .map_err(|e| ClaimError::EncryptionFailed(e.to_string()))?;

        let key = SealingKey::derive(sender_key, recipient_key)?;
        let nonce = SealNonce::generate();
        let ciphertext = key.encrypt(&plaintext, &nonce)?;

        Ok(Self {
            format: SealFormat::Aes256Gcm,
            sender: sender.to_string(),
            nonce,
            ciphertext,
        })
    }

    /// Open an envelope addressed to us.
    ///
    /// `sender_key` is the sender's public key, looked up by the cleartext
    /// sender name. Any tampering with the ciphertext, a wrong key on
    /// either side, or a reused envelope re-addressed to another recipient
    /// fails the authentication tag.
    pub fn open(
        &self,
        recipient_key: Option<&EcPrivateKey>,
        sender_key: Option<&EcPublicKey>,
    ) -> Result<Claim, ClaimError> {
        let recipient_key = recipient_key.ok_or(ClaimError::PrivateKeyRequired)?;
        let sender_key = sender_key.ok_or(ClaimError::PublicKeyRequired)?;

        let key = SealingKey::derive(recipient_key, sender_key)
            .map_err(|e| ClaimError::DecryptionFailed(e.to_string()))?;
        let plaintext = key.decrypt(&self.ciphertext, &self.nonce)?;

        serde_json::from_slice(&plaintext)
            .map_err(|e| ClaimError::MalformedToken(format!("sealed claim payload: {e}")))
    }

    /// Encode for the wire: base64 over CBOR.
    pub fn to_wire(&self) -> Result<String, ClaimError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)
            .map_err(|e| ClaimError::EncryptionFailed(e.to_string()))?;
        Ok(BASE64.encode(bytes))
    }

    /// Decode a wire-form envelope.
    pub fn from_wire(wire: &str) -> Result<Self, ClaimError> {
        let bytes = BASE64
            .decode(wire)
            .map_err(|e| ClaimError::MalformedToken(format!("base64 decoding envelope: {e}")))?;
        ciborium::from_reader(bytes.as_slice())
            .map_err(|e| ClaimError::MalformedToken(format!("cbor decoding envelope: {e}")))
    }
}
