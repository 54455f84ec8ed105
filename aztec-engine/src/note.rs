//! The confidential note primitive: a Pedersen commitment `(gamma, sigma)`
//! to a value `k` under viewing key `a`.

use rand::{CryptoRng, RngCore};
use sha3::{Digest, Keccak256};

use crate::crs::Crs;
use crate::curve::GroupPoint;
use crate::error::AztecError;
use crate::field::GroupScalar;

/// Largest value a note may commit to: 2^32 - 1.
pub const K_MAX: u64 = (1u64 << 32) - 1;

#[derive(Clone, Copy, Debug)]
pub struct Note {
    pub k: u64,
    pub a: GroupScalar,
    pub gamma: GroupPoint,
    pub sigma: GroupPoint,
    pub owner: [u8; 20],
}

impl Note {
    /// Builds a note directly from a known viewing key `a`. This is the
    /// fully-specified construction path — wallets that already hold
    /// `a` should use it rather than `from_public_key`.
    pub fn from_viewing_key<R: RngCore + CryptoRng>(
        crs: &Crs,
        k: u64,
        a: GroupScalar,
        owner: [u8; 20],
        rng: &mut R,
    ) -> Result<Self, AztecError> {
        if k > K_MAX {
            return Err(AztecError::NoteValueTooBig);
        }
        if a.is_zero() {
            return Err(AztecError::ViewingKeyMalformed);
        }
        let gamma = random_on_curve(rng);
        let sigma = crs.h.mul(&GroupScalar::from_u64(k)).add(&gamma.mul(&a));
        Ok(Note { k, a, gamma, sigma, owner })
    }

    /// Builds a note from a secp256k1 public key and a per-note nonce. The
    /// real AZTEC client derives `a` via an ECDH shared-secret HKDF against
    /// the spender's wallet key (explicitly wallet-layer, out of scope here).
    /// This is a documented stand-in: `a = Keccak256(pubkey ‖ nonce)`
    /// reduced mod n, re-sampled if it lands on zero.
    pub fn from_public_key<R: RngCore + CryptoRng>(
        crs: &Crs,
        k: u64,
        pubkey_bytes: &[u8],
        nonce: u64,
        owner: [u8; 20],
        rng: &mut R,
    ) -> Result<Self, AztecError> {
        let mut preimage = pubkey_bytes.to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let mut digest: [u8; 32] = Keccak256::digest(&preimage).into();
        let mut a = GroupScalar::reduce_from_bytes(&digest);
        let mut salt = nonce;
        while a.is_zero() {
            salt = salt.wrapping_add(1);
            let mut retry_preimage = pubkey_bytes.to_vec();
            retry_preimage.extend_from_slice(&salt.to_be_bytes());
            digest = Keccak256::digest(&retry_preimage).into();
            a = GroupScalar::reduce_from_bytes(&digest);
        }
        Self::from_viewing_key(crs, k, a, owner, rng)
    }

    /// `Keccak256(gamma.x ‖ gamma.y ‖ sigma.x ‖ sigma.y)`.
    pub fn note_hash(&self) -> [u8; 32] {
        let mut preimage = Vec::with_capacity(128);
        preimage.extend_from_slice(&self.gamma.x_bytes());
        preimage.extend_from_slice(&self.gamma.y_bytes());
        preimage.extend_from_slice(&self.sigma.x_bytes());
        preimage.extend_from_slice(&self.sigma.y_bytes());
        Keccak256::digest(&preimage).into()
    }

    /// Validates that a note parsed from untrusted wire data satisfies the
    /// core invariants: points on-curve and non-identity, value within range.
    pub fn validate(gamma: &GroupPoint, sigma: &GroupPoint, k: u64) -> Result<(), AztecError> {
        if gamma.is_identity() || sigma.is_identity() {
            return Err(AztecError::PointAtInfinity);
        }
        if k > K_MAX {
            return Err(AztecError::NoteValueTooBig);
        }
        Ok(())
    }
}

fn random_on_curve<R: RngCore + CryptoRng>(rng: &mut R) -> GroupPoint {
    let scalar = GroupScalar::random(rng);
    GroupPoint::generator().mul(&scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_crs() -> Crs {
        Crs::insecure_test_crs()
    }

    #[test]
    fn from_viewing_key_respects_k_max() {
        let crs = test_crs();
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        let a = GroupScalar::from_u64(5);
        let err = Note::from_viewing_key(&crs, K_MAX + 1, a, [0u8; 20], &mut rng).unwrap_err();
        assert_eq!(err, AztecError::NoteValueTooBig);
    }

    #[test]
    fn from_viewing_key_rejects_zero_a() {
        let crs = test_crs();
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        let err = Note::from_viewing_key(&crs, 10, GroupScalar::zero(), [0u8; 20], &mut rng)
            .unwrap_err();
        assert_eq!(err, AztecError::ViewingKeyMalformed);
    }

    #[test]
    fn note_hash_is_deterministic() {
        let crs = test_crs();
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let note = Note::from_viewing_key(&crs, 10, GroupScalar::from_u64(7), [0u8; 20], &mut rng)
            .unwrap();
        assert_eq!(note.note_hash(), note.note_hash());
    }

    #[test]
    fn from_public_key_derives_nonzero_viewing_key() {
        let crs = test_crs();
        let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
        let note = Note::from_public_key(&crs, 10, b"some-pubkey-bytes", 1, [0u8; 20], &mut rng)
            .unwrap();
        assert!(!note.a.is_zero());
    }
}
