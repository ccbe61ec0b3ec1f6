//! Signer key resolution.
//!
//! Verifiers look up the keys an entity is currently trusted under. The
//! lookup returns a set rather than a single key so a signer can rotate:
//! claims signed under the outgoing key stay valid while both keys are
//! published.

use std::collections::HashMap;

use attest_core::EcPublicKey;

/// Resolves an entity name to its currently trusted public keys.
pub trait KeyDirectory {
    /// All keys `entity` may have signed under, or `None` if the entity
    /// is unknown.
    fn public_keys(&self, entity: &str) -> Option<Vec<EcPublicKey>>;
}

/// A static, in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entries: HashMap<String, Vec<EcPublicKey>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key for an entity, keeping any previously registered
    /// keys.
    pub fn insert(&mut self, entity: impl Into<String>, key: EcPublicKey) {
        self.entries.entry(entity.into()).or_default().push(key);
    }

    /// Drop every key registered for an entity.
    pub fn remove(&mut self, entity: &str) {
        self.entries.remove(entity);
    }
}

impl KeyDirectory for InMemoryDirectory {
    fn public_keys(&self, entity: &str) -> Option<Vec<EcPublicKey>> {
        self.entries.get(entity).cloned()
    }
}
