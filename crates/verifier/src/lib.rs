//! The proving-system boundary.
//!
//! The settlement logic never interprets proof bytes.  It hands them to a
//! [`ProofVerifier`] and treats the answer as ground truth, so the whole
//! proving stack stays swappable behind these traits.

pub mod proof;
pub mod verifier;

pub use proof::{Proof, PublicValues};
pub use verifier::{
    AcceptingVerifier, HeaderVerifier, NonEmptyProofVerifier, ProofVerifier, RejectingVerifier,
    TrivialHeaderVerifier, VerifyError,
};
