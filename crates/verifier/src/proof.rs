//! Opaque byte containers crossing the proving-system boundary.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A validity proof as the prover hands it over.  Never interpreted here.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Proof(Vec<u8>);

impl Proof {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Proof {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// The public values a proof attests to, presented alongside the [`Proof`]
/// whenever the verifier is consulted.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct PublicValues(Vec<u8>);

impl PublicValues {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for PublicValues {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}
