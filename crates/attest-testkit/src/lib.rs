//! # Attest Testkit
//!
//! Testing utilities for the attest crates.
//!
//! ## Fixtures
//!
//! Quickly set up multi-party scenarios:
//!
//! ```rust
//! use attest::Verifier;
//! use attest_testkit::fixtures::{directory_of, multi_party_fixtures};
//!
//! let parties = multi_party_fixtures(&["alice", "bob"]);
//! let token = parties[0].issue_token("alice", "bob", &["read"]);
//!
//! let verifier = Verifier::new(directory_of(&parties));
//! verifier.check(&token, "bob", &["read"]).unwrap();
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use attest_testkit::generators::{claim_from_params, ClaimParams};
//!
//! proptest! {
//!     #[test]
//!     fn claim_roundtrips(params: ClaimParams) {
//!         let claim = claim_from_params(&params);
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{directory_of, multi_party_fixtures, TestParty};
pub use generators::{claim_from_params, ClaimParams};
