//! Canonical byte encoding for signing.
//!
//! Signatures must cover every claim field byte-for-byte with no room for
//! reordering, so the signed message is a deterministic CBOR map (RFC 8949
//! core deterministic encoding): small integer keys in ascending order,
//! smallest integer widths, definite lengths only, no floats.

use ciborium::value::Value;

use crate::claim::{Claim, ClaimRequest};

/// Claim field keys. Keys 0-23 encode as single bytes in CBOR.
mod claim_keys {
    pub const CLAIM_TYPE: u64 = 0;
    pub const CLAIMANT: u64 = 1;
    pub const DESTINATION: u64 = 2;
    pub const CAPABILITIES: u64 = 3;
    pub const VALID_AFTER: u64 = 4;
    pub const VALID_BEFORE: u64 = 5;
    pub const SCHEME: u64 = 6;
}

/// Request field keys.
mod request_keys {
    pub const CLAIMANT: u64 = 0;
    pub const DESTINATION: u64 = 1;
    pub const CAPABILITIES: u64 = 2;
    pub const VALID_AFTER: u64 = 3;
    pub const VALID_BEFORE: u64 = 4;
}

/// The byte sequence a claim's signature covers: every field except the
/// signature itself.
pub fn canonical_claim_bytes(claim: &Claim) -> Vec<u8> {
    let caps: Vec<Value> = claim
        .capabilities
        .iter()
        .map(|c| Value::Text(c.clone()))
        .collect();

    // Entries are built in ascending key order; the encoder relies on it.
    let entries = vec![
        (
            Value::Integer(claim_keys::CLAIM_TYPE.into()),
            Value::Text(claim.claim_type.clone()),
        ),
        (
            Value::Integer(claim_keys::CLAIMANT.into()),
            Value::Text(claim.claimant.clone()),
        ),
        (
            Value::Integer(claim_keys::DESTINATION.into()),
            Value::Text(claim.destination.clone()),
        ),
        (
            Value::Integer(claim_keys::CAPABILITIES.into()),
            Value::Array(caps),
        ),
        (
            Value::Integer(claim_keys::VALID_AFTER.into()),
            Value::Integer(claim.valid_after.into()),
        ),
        (
            Value::Integer(claim_keys::VALID_BEFORE.into()),
            Value::Integer(claim.valid_before.into()),
        ),
        (
            Value::Integer(claim_keys::SCHEME.into()),
            Value::Text(claim.signature_scheme.as_str().to_string()),
        ),
    ];

    let mut buf = Vec::new();
    encode_map(&mut buf, &entries);
    buf
}

/// The byte sequence a claim request's signature covers.
pub fn canonical_request_bytes(request: &ClaimRequest) -> Vec<u8> {
    let caps: Vec<Value> = request
        .capabilities
        .iter()
        .map(|c| Value::Text(c.clone()))
        .collect();

    let entries = vec![
        (
            Value::Integer(request_keys::CLAIMANT.into()),
            Value::Text(request.claimant.clone()),
        ),
        (
            Value::Integer(request_keys::DESTINATION.into()),
            Value::Text(request.destination.clone()),
        ),
        (
            Value::Integer(request_keys::CAPABILITIES.into()),
            Value::Array(caps),
        ),
        (
            Value::Integer(request_keys::VALID_AFTER.into()),
            Value::Integer(request.valid_after.into()),
        ),
        (
            Value::Integer(request_keys::VALID_BEFORE.into()),
            Value::Integer(request.valid_before.into()),
        ),
    ];

    let mut buf = Vec::new();
    encode_map(&mut buf, &entries);
    buf
}

/// Encode a map (major type 5) whose entries are already in canonical
/// key order.
fn encode_map(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    encode_uint(buf, 5, entries.len() as u64);
    for (key, value) in entries {
        encode_value(buf, key);
        encode_value(buf, value);
    }
}

fn encode_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            let n: i128 = (*i).into();
            if n >= 0 {
                encode_uint(buf, 0, n as u64);
            } else {
                // CBOR encodes -1 as 0, -2 as 1, etc.
                encode_uint(buf, 1, (-1 - n) as u64);
            }
        }
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(items) => {
            encode_uint(buf, 4, items.len() as u64);
            for item in items {
                encode_value(buf, item);
            }
        }
        Value::Map(entries) => encode_map(buf, entries),
        _ => unreachable!("canonical claim encoding uses integers, text, and arrays only"),
    }
}

/// Encode an unsigned integer with the given major type, smallest width.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{SignatureScheme, CLAIM_TYPE};
    use crate::crypto::EcdsaSignature;

    fn sample_claim() -> Claim {
        Claim {
            claim_type: CLAIM_TYPE.to_string(),
            claimant: "alice".to_string(),
            destination: "bob".to_string(),
            capabilities: vec!["read".to_string()],
            valid_after: 1_700_000_000,
            valid_before: 1_700_003_600,
            signature: EcdsaSignature::ZERO,
            signature_scheme: SignatureScheme::Sha256,
        }
    }

    #[test]
    fn test_deterministic() {
        let claim = sample_claim();
        assert_eq!(canonical_claim_bytes(&claim), canonical_claim_bytes(&claim));
    }

    #[test]
    fn test_signature_not_covered() {
        let mut claim = sample_claim();
        let before = canonical_claim_bytes(&claim);
        claim.signature = EcdsaSignature::from_bytes([0xff; 64]);
        assert_eq!(before, canonical_claim_bytes(&claim));
    }

    #[test]
    fn test_every_other_field_covered() {
        let base = canonical_claim_bytes(&sample_claim());

        let mut c = sample_claim();
        c.claimant = "mallory".to_string();
        assert_ne!(base, canonical_claim_bytes(&c));

        let mut c = sample_claim();
        c.destination = "carol".to_string();
        assert_ne!(base, canonical_claim_bytes(&c));

        let mut c = sample_claim();
        c.capabilities.push("write".to_string());
        assert_ne!(base, canonical_claim_bytes(&c));

        let mut c = sample_claim();
        c.valid_before += 1;
        assert_ne!(base, canonical_claim_bytes(&c));
    }

    #[test]
    fn test_capability_order_is_covered() {
        // Capabilities are an ordered sequence in the signed bytes; two
        // claims granting the same set in a different order sign
        // differently and must both verify on their own bytes.
        let mut a = sample_claim();
        a.capabilities = vec!["read".to_string(), "write".to_string()];
        let mut b = sample_claim();
        b.capabilities = vec!["write".to_string(), "read".to_string()];
        assert_ne!(canonical_claim_bytes(&a), canonical_claim_bytes(&b));
    }

    #[test]
    fn test_map_header_and_first_key() {
        let bytes = canonical_claim_bytes(&sample_claim());
        // Map with 7 entries, first key 0, first value text of len 7.
        assert_eq!(bytes[0], 0xa7);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(bytes[2], 0x60 | CLAIM_TYPE.len() as u8);
    }

    #[test]
    fn test_request_bytes_exclude_signature() {
        let mut req = ClaimRequest::new(
            "alice",
            "bob",
            vec!["read".to_string()],
            std::time::Duration::from_secs(60),
        );
        let before = canonical_request_bytes(&req);
        req.signature = Some(EcdsaSignature::from_bytes([1u8; 64]));
        assert_eq!(before, canonical_request_bytes(&req));
    }
}
