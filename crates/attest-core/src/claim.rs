//! Claim model: the signed assertion and the request that produces it.
//!
//! A claim is an immutable, signed statement that `claimant` may present
//! the listed capabilities to `destination` for a bounded time. Once
//! signed it is never edited; it expires logically, not physically.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::crypto::EcdsaSignature;
use crate::error::ClaimError;
use crate::skew::unix_now;

/// Type tag embedded in every claim token.
pub const CLAIM_TYPE: &str = "ATTESTC";

/// Default lifetime of a requested claim.
pub const DEFAULT_CLAIM_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signature scheme tag carried alongside the signature bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    /// ECDSA P-256 over SHA-256, 64-byte `r || s`.
    #[serde(rename = "SHA256")]
    Sha256,
}

impl SignatureScheme {
    /// Wire tag for canonical encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureScheme::Sha256 => "SHA256",
        }
    }
}

/// The unsigned intent: what a requester asks a signing authority for.
///
/// Consumed once by the signer. The optional signature authenticates the
/// request itself (the requester signs the request's canonical bytes
/// before submitting it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Entity asking to be claimed.
    #[serde(rename = "entity_name")]
    pub claimant: String,

    /// Entity the claim will be presented to.
    #[serde(rename = "destination")]
    pub destination: String,

    /// Capabilities requested, exact strings.
    #[serde(rename = "capabilities")]
    pub capabilities: Vec<String>,

    /// Start of the validity window (Unix seconds).
    #[serde(rename = "ctime")]
    pub valid_after: i64,

    /// End of the validity window (Unix seconds).
    #[serde(rename = "etime")]
    pub valid_before: i64,

    /// Requester's signature over the request's canonical bytes.
    #[serde(rename = "entity_signature", skip_serializing_if = "Option::is_none")]
    pub signature: Option<EcdsaSignature>,
}

impl ClaimRequest {
    /// Build a request valid from now until now plus `ttl`, unsigned.
    pub fn new(
        claimant: impl Into<String>,
        destination: impl Into<String>,
        capabilities: Vec<String>,
        ttl: Duration,
    ) -> Self {
        let now = unix_now();
        Self {
            claimant: claimant.into(),
            destination: destination.into(),
            capabilities,
            valid_after: now,
            valid_before: now + ttl.as_secs() as i64,
            signature: None,
        }
    }
}

/// The signed, serializable claim token.
///
/// The signature covers every other field byte-for-byte via the canonical
/// encoding; reordering or editing any field invalidates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Token type tag.
    #[serde(rename = "ct")]
    pub claim_type: String,

    /// Entity this claim was issued to.
    #[serde(rename = "e")]
    pub claimant: String,

    /// Entity this claim is addressed to.
    #[serde(rename = "d")]
    pub destination: String,

    /// Granted capabilities, exact strings.
    #[serde(rename = "c")]
    pub capabilities: Vec<String>,

    /// Start of the validity window (Unix seconds).
    #[serde(rename = "va")]
    pub valid_after: i64,

    /// End of the validity window (Unix seconds).
    #[serde(rename = "vb")]
    pub valid_before: i64,

    /// Signature over the canonical bytes of all other fields.
    #[serde(rename = "s")]
    pub signature: EcdsaSignature,

    /// Scheme the signature was produced with.
    #[serde(rename = "st")]
    pub signature_scheme: SignatureScheme,
}

impl Claim {
    /// True if the claim grants `capability` (exact string match).
    pub fn grants(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Serialize a claim for sending on the wire: base64 over JSON.
pub fn marshal_claim(claim: &Claim) -> Result<String, ClaimError> {
    let bytes =
        serde_json::to_vec(claim).map_err(|e| ClaimError::MalformedToken(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Parse a wire-form claim token back into a [`Claim`].
pub fn unmarshal_claim(token: &str) -> Result<Claim, ClaimError> {
    let bytes = BASE64
        .decode(token)
        .map_err(|e| ClaimError::MalformedToken(format!("base64 decoding token: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClaimError::MalformedToken(format!("json decoding token: {e}")))
}
