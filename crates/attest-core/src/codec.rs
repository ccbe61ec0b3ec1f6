//! Key encodings: compressed EC points and RSA PEM.
//!
//! The compressed form is the transportable string representation of a
//! P-256 public key: a two-hex-digit parity prefix (`02` even, `03` odd)
//! followed by the x-coordinate in hex. Decompression recovers y from the
//! curve equation, selecting the root that matches the stored parity.
//!
//! The RSA helpers exist for entities enrolled with RSA identity keys;
//! their effective signing key is a P-256 key derived deterministically
//! from the RSA private key.

use p256::elliptic_curve::sec1::FromEncodedPoint;
use p256::{EncodedPoint, PublicKey, SecretKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::crypto::{EcPrivateKey, EcPublicKey};
use crate::error::ClaimError;

/// Compressed x-coordinate length in hex digits.
const X_HEX_LEN: usize = 64;

/// Render a public key in compressed string form.
///
/// Deterministic: the same point always yields the same string.
pub fn compress_public_key(key: &EcPublicKey) -> String {
    hex::encode(key.to_compressed_bytes())
}

/// Reconstruct a public key from its compressed string form.
///
/// Accepts x-coordinates with leading zeros trimmed (some encoders drop
/// them); they are left-padded before decoding.
pub fn decompress_public_key(compressed: &str) -> Result<EcPublicKey, ClaimError> {
    let prefix = compressed
        .get(..2)
        .ok_or_else(|| ClaimError::MalformedKey("key too short".into()))?;
    let tag: u8 = match prefix {
        "02" => 0x02,
        "03" => 0x03,
        _ => {
            return Err(ClaimError::MalformedKey(format!(
                "bad parity prefix {prefix:?}"
            )))
        }
    };

    let x_hex = compressed
        .get(2..)
        .ok_or_else(|| ClaimError::MalformedKey("key too short".into()))?;
    if x_hex.is_empty() || x_hex.len() > X_HEX_LEN {
        return Err(ClaimError::MalformedKey(format!(
            "x-coordinate has {} hex digits",
            x_hex.len()
        )));
    }

    let padded = format!("{:0>64}", x_hex);
    let x = hex::decode(&padded).map_err(|e| ClaimError::MalformedKey(e.to_string()))?;

    let mut sec1 = Vec::with_capacity(1 + x.len());
    sec1.push(tag);
    sec1.extend_from_slice(&x);

    let point = EncodedPoint::from_bytes(&sec1)
        .map_err(|e| ClaimError::MalformedKey(e.to_string()))?;
    let key: Option<PublicKey> = PublicKey::from_encoded_point(&point).into();
    key.map(EcPublicKey::from_inner)
        .ok_or(ClaimError::PointNotOnCurve)
}

/// Decode an RSA private key from PKCS#1 PEM text.
pub fn rsa_private_from_pem(pem: &str) -> Result<RsaPrivateKey, ClaimError> {
    RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| ClaimError::MalformedKey(e.to_string()))
}

/// Encode an RSA private key as PKCS#1 PEM text.
pub fn rsa_private_to_pem(key: &RsaPrivateKey) -> Result<String, ClaimError> {
    key.to_pkcs1_pem(LineEnding::LF)
        .map(|pem| pem.to_string())
        .map_err(|e| ClaimError::MalformedKey(e.to_string()))
}

/// Encode an RSA public key as SPKI PEM text.
pub fn rsa_public_to_pem(key: &RsaPublicKey) -> Result<String, ClaimError> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| ClaimError::MalformedKey(e.to_string()))
}

/// Decode an RSA public key from SPKI PEM text.
pub fn rsa_public_from_pem(pem: &str) -> Result<RsaPublicKey, ClaimError> {
    RsaPublicKey::from_public_key_pem(pem).map_err(|e| ClaimError::MalformedKey(e.to_string()))
}

/// Derive a P-256 private key from an RSA private key.
///
/// The scalar is the SHA-256 digest of the PKCS#1 DER encoding, so the
/// same RSA key always yields the same EC key.
pub fn ec_key_from_rsa(key: &RsaPrivateKey) -> Result<EcPrivateKey, ClaimError> {
    let der = key
        .to_pkcs1_der()
        .map_err(|e| ClaimError::MalformedKey(e.to_string()))?;
    let digest = Sha256::digest(der.as_bytes());

    let secret = SecretKey::from_slice(&digest)
        .map_err(|e| ClaimError::MalformedKey(e.to_string()))?;
    Ok(EcPrivateKey::from_inner(secret))
}
