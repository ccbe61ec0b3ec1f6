//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::time::Duration;

use attest::{sign_claim, InMemoryDirectory};
use attest_core::{marshal_claim, Claim, ClaimRequest, EcPrivateKey, DEFAULT_CLAIM_TTL};

/// A named party with a deterministic key.
pub struct TestParty {
    pub name: String,
    pub key: EcPrivateKey,
}

impl TestParty {
    /// Create a party with a random key.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: EcPrivateKey::generate(),
        }
    }

    /// Create with a deterministic key from a seed.
    ///
    /// The seed is masked into a scalar that is always nonzero and below
    /// the group order.
    pub fn with_seed(name: &str, seed: [u8; 32]) -> Self {
        let mut scalar = seed;
        scalar[0] &= 0x7f;
        scalar[31] |= 1;
        let key = EcPrivateKey::from_bytes(&scalar).expect("masked seed is a valid scalar");
        Self {
            name: name.to_string(),
            key,
        }
    }

    /// Get the party's public key.
    pub fn public_key(&self) -> attest_core::EcPublicKey {
        self.key.public_key()
    }

    /// Issue a claim signed by this party.
    pub fn issue_claim(&self, claimant: &str, destination: &str, capabilities: &[&str]) -> Claim {
        self.issue_claim_with_ttl(claimant, destination, capabilities, DEFAULT_CLAIM_TTL)
    }

    /// Issue a claim with an explicit lifetime.
    pub fn issue_claim_with_ttl(
        &self,
        claimant: &str,
        destination: &str,
        capabilities: &[&str],
        ttl: Duration,
    ) -> Claim {
        let request = ClaimRequest::new(
            claimant,
            destination,
            capabilities.iter().map(|c| c.to_string()).collect(),
            ttl,
        );
        sign_claim(&request, Some(&self.key)).expect("signing key present")
    }

    /// Issue a claim and marshal it to wire form.
    pub fn issue_token(&self, claimant: &str, destination: &str, capabilities: &[&str]) -> String {
        let claim = self.issue_claim(claimant, destination, capabilities);
        marshal_claim(&claim).expect("claim marshals")
    }
}

/// Create multiple parties with distinct deterministic keys.
pub fn multi_party_fixtures(names: &[&str]) -> Vec<TestParty> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut seed = [0u8; 32];
            seed[0] = (i + 1) as u8;
            TestParty::with_seed(name, seed)
        })
        .collect()
}

/// A directory trusting each party under its own name.
pub fn directory_of(parties: &[TestParty]) -> InMemoryDirectory {
    let mut directory = InMemoryDirectory::new();
    for party in parties {
        directory.insert(party.name.clone(), party.public_key());
    }
    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest::{KeyDirectory, Verifier};

    #[test]
    fn test_seeded_party_is_deterministic() {
        let a = TestParty::with_seed("alice", [7u8; 32]);
        let b = TestParty::with_seed("alice", [7u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_multi_party_keys_distinct() {
        let parties = multi_party_fixtures(&["alice", "bob", "carol"]);
        assert_ne!(parties[0].public_key(), parties[1].public_key());
        assert_ne!(parties[1].public_key(), parties[2].public_key());
        assert_ne!(parties[0].public_key(), parties[2].public_key());
    }

    #[test]
    fn test_directory_of_covers_all_parties() {
        let parties = multi_party_fixtures(&["alice", "bob"]);
        let directory = directory_of(&parties);
        assert!(directory.public_keys("alice").is_some());
        assert!(directory.public_keys("bob").is_some());
        assert!(directory.public_keys("carol").is_none());
    }

    #[test]
    fn test_issued_token_checks() {
        let parties = multi_party_fixtures(&["alice"]);
        let token = parties[0].issue_token("alice", "bob", &["read"]);

        let verifier = Verifier::new(directory_of(&parties));
        verifier.check(&token, "bob", &["read"]).unwrap();
    }
}
