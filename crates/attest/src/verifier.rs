//! Token verification against a key directory.
//!
//! [`Verifier`] is the receiving side: it parses wire tokens, resolves
//! the claimant's trusted keys through a [`KeyDirectory`], and runs the
//! full validation and authorization pipeline.

use std::time::Duration;

use attest_core::{
    check_claim_any, unmarshal_claim, unix_now, validate_claim_any, Claim, ClaimError,
    EcPublicKey, DEFAULT_CLOCK_SKEW,
};

use crate::directory::KeyDirectory;

/// Verifies wire-form claim tokens.
pub struct Verifier<D: KeyDirectory> {
    directory: D,
    skew: Duration,
}

impl<D: KeyDirectory> Verifier<D> {
    /// Create a verifier with the default clock-skew tolerance.
    pub fn new(directory: D) -> Self {
        Self::with_skew(directory, DEFAULT_CLOCK_SKEW)
    }

    /// Create a verifier with an explicit clock-skew tolerance.
    pub fn with_skew(directory: D, skew: Duration) -> Self {
        Self { directory, skew }
    }

    /// Parse a token and validate it: structure, validity window, and
    /// signature by any of the claimant's trusted keys.
    pub fn validate(&self, token: &str) -> Result<Claim, ClaimError> {
        self.validate_at(token, unix_now())
    }

    /// [`validate`](Self::validate) against an explicit reference time.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claim, ClaimError> {
        let claim = unmarshal_claim(token)?;
        let keys = self.resolve(&claim)?;

        if let Err(error) = validate_claim_any(&claim, &keys, now, self.skew) {
            tracing::debug!(claimant = %claim.claimant, %error, "claim rejected");
            return Err(error);
        }
        Ok(claim)
    }

    /// Full authorization: validate, then require that the claim is
    /// addressed to `destination` and grants every capability in
    /// `required`.
    pub fn check<S: AsRef<str>>(
        &self,
        token: &str,
        destination: &str,
        required: &[S],
    ) -> Result<Claim, ClaimError> {
        self.check_at(token, destination, required, unix_now())
    }

    /// [`check`](Self::check) against an explicit reference time.
    pub fn check_at<S: AsRef<str>>(
        &self,
        token: &str,
        destination: &str,
        required: &[S],
        now: i64,
    ) -> Result<Claim, ClaimError> {
        let claim = unmarshal_claim(token)?;
        let keys = self.resolve(&claim)?;

        if let Err(error) = check_claim_any(&claim, &keys, destination, required, now, self.skew)
        {
            tracing::debug!(
                claimant = %claim.claimant,
                destination,
                %error,
                "claim check failed"
            );
            return Err(error);
        }
        Ok(claim)
    }

    fn resolve(&self, claim: &Claim) -> Result<Vec<EcPublicKey>, ClaimError> {
        self.directory
            .public_keys(&claim.claimant)
            .ok_or_else(|| ClaimError::SignerUnknown(claim.claimant.clone()))
    }
}
