use thiserror::Error;

use trestle_state::block::BlockHeader;

use crate::proof::{Proof, PublicValues};

/// Why a verifier rejected a proof.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum VerifyError {
    /// The proof doesn't verify.
    #[error("invalid proof")]
    InvalidProof,

    /// The proof verifies but doesn't attest to these public values.
    #[error("public values mismatch")]
    PublicValuesMismatch,
}

/// Decides whether a validity proof vouches for a batch.  The settlement
/// logic treats the answer as authoritative and never looks at the bytes
/// itself.
pub trait ProofVerifier {
    fn verify(&self, proof: &Proof, public_values: &PublicValues) -> Result<(), VerifyError>;
}

/// Checks that a block header's attested identity is consistent with its
/// contents.  Must be consulted before anything trusts a header.
pub trait HeaderVerifier {
    fn verify_header(&self, header: &BlockHeader) -> bool;
}

/// Header verifier that accepts every header.  The real integrity check
/// lives with the hashing scheme of the L2 node; this stands in for it.
#[derive(Clone, Debug, Default)]
pub struct TrivialHeaderVerifier;

impl HeaderVerifier for TrivialHeaderVerifier {
    fn verify_header(&self, _header: &BlockHeader) -> bool {
        true
    }
}

/// Proof verifier that accepts everything.  Test double.
#[derive(Clone, Debug, Default)]
pub struct AcceptingVerifier;

impl ProofVerifier for AcceptingVerifier {
    fn verify(&self, _proof: &Proof, _public_values: &PublicValues) -> Result<(), VerifyError> {
        Ok(())
    }
}

/// Proof verifier that rejects everything.  Test double.
#[derive(Clone, Debug, Default)]
pub struct RejectingVerifier;

impl ProofVerifier for RejectingVerifier {
    fn verify(&self, _proof: &Proof, _public_values: &PublicValues) -> Result<(), VerifyError> {
        Err(VerifyError::InvalidProof)
    }
}

/// Proof verifier that accepts any nonempty proof.  Stand-in for a real
/// proving system in tests where both outcomes need to be reachable from
/// one verifier.
#[derive(Clone, Debug, Default)]
pub struct NonEmptyProofVerifier;

impl ProofVerifier for NonEmptyProofVerifier {
    fn verify(&self, proof: &Proof, _public_values: &PublicValues) -> Result<(), VerifyError> {
        if proof.is_empty() {
            return Err(VerifyError::InvalidProof);
        }
        Ok(())
    }
}
