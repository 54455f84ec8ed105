//! The Fiat-Shamir "rolling hash" transcript.
//!
//! Unlike a pure hash-of-everything transform, this is explicit mutable
//! state: callers `append` byte strings into a buffer, then call
//! `finalize_and_reseed`, which hashes the buffer with Keccak-256 and
//! *replaces* the buffer with that digest. The next round's `append` calls
//! extend the digest rather than starting fresh, so every challenge in a
//! multi-round proof is bound to every challenge before it.

use sha3::{Digest, Keccak256};

use crate::field::GroupScalar;

#[derive(Clone)]
pub struct Keccak256Transcript {
    buffer: Vec<u8>,
}

impl Keccak256Transcript {
    pub fn new() -> Self {
        Keccak256Transcript { buffer: Vec::new() }
    }

    /// Appends raw bytes to the buffer. Fixed-width fields (addresses,
    /// coordinates, scalars) should already be padded by the caller — the
    /// transcript itself does not pad.
    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    pub fn append_scalar(&mut self, scalar: &GroupScalar) -> &mut Self {
        self.append(&scalar.to_bytes_be())
    }

    /// Hashes the current buffer with Keccak-256, replaces the buffer with
    /// the 32-byte digest, and returns the digest reduced into the scalar
    /// field as the round's challenge.
    pub fn finalize_and_reseed(&mut self) -> GroupScalar {
        let digest: [u8; 32] = Keccak256::digest(&self.buffer).into();
        self.buffer = digest.to_vec();
        GroupScalar::reduce_from_bytes(&digest)
    }

    /// Same as `finalize_and_reseed`, but appends a domain-separation
    /// context string ahead of the existing buffer before hashing. Used to
    /// bind a challenge to the specific proof kind it belongs to.
    pub fn finalize_and_reseed_with_context(&mut self, context: &[u8]) -> GroupScalar {
        let mut preimage = Vec::with_capacity(context.len() + self.buffer.len());
        preimage.extend_from_slice(context);
        preimage.extend_from_slice(&self.buffer);
        let digest: [u8; 32] = Keccak256::digest(&preimage).into();
        self.buffer = digest.to_vec();
        GroupScalar::reduce_from_bytes(&digest)
    }
}

impl Default for Keccak256Transcript {
    fn default() -> Self {
        Self::new()
    }
}
