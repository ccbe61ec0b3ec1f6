//! Error types for attest claim operations.

use thiserror::Error;

/// Errors surfaced by claim construction, sealing, and verification.
///
/// Every failure identifies the check that failed so callers can tell a
/// configuration problem (missing key) from tampering (bad signature) from
/// routine expiry. None of these are transient; nothing here is retried.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Compressed key string is the wrong shape (length, prefix, non-hex).
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// Decoded x-coordinate has no corresponding point on the curve.
    #[error("key not on curve")]
    PointNotOnCurve,

    /// Claim token could not be unmarshalled.
    #[error("malformed claim token: {0}")]
    MalformedToken(String),

    /// Embedded signature does not verify against the signer's public key.
    #[error("claim token has invalid signature")]
    SignatureInvalid,

    /// The claimant is not known to the key directory.
    #[error("unknown signer: {0}")]
    SignerUnknown(String),

    /// Current time is outside the claim's validity window (skew-adjusted).
    #[error("claim token not valid: {0}")]
    Expired(String),

    /// Claim was issued for a different destination entity.
    #[error("claim token destination is not {0:?}")]
    WrongDestination(String),

    /// Claim does not grant a required capability.
    #[error("claim token does not grant {0:?}")]
    MissingCapability(String),

    /// Signing was attempted without a private key.
    #[error("signing key required")]
    SigningKeyRequired,

    /// Sealing was attempted without the sender's private key.
    #[error("sender private key required")]
    PrivateKeyRequired,

    /// Sealing was attempted without the recipient's public key.
    #[error("recipient public key required")]
    PublicKeyRequired,

    /// AEAD encryption failed.
    #[error("encrypting claim: {0}")]
    EncryptionFailed(String),

    /// AEAD decryption failed (wrong key pair or tampered ciphertext).
    #[error("decrypting claim: {0}")]
    DecryptionFailed(String),
}
