//! BN128 scalar (mod n, the group order) and base-field (mod p, the
//! coordinate field) arithmetic.
//!
//! The two moduli are modeled as distinct types on purpose: `GroupScalar`
//! wraps `ark_bn254::Fr` and `BaseField` wraps `ark_bn254::Fq`. There is no
//! `From`/`Into` between them and no shared arithmetic trait — a coordinate
//! can never be added to a scalar by accident, the way `groupReduction` and
//! `red` contexts could be confused in the source this crate replaces.

use ark_ff::{BigInteger, Field, PrimeField};
use rand::{CryptoRng, RngCore};

use crate::error::AztecError;

fn pad32(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let start = 32 - bytes.len();
    out[start..].copy_from_slice(bytes);
    out
}

/// A scalar in `[0, n)`, reduced modulo the BN128 group order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GroupScalar(pub(crate) ark_bn254::Fr);

impl GroupScalar {
    pub fn zero() -> Self {
        GroupScalar(ark_bn254::Fr::from(0u64))
    }

    pub fn from_u64(v: u64) -> Self {
        GroupScalar(ark_bn254::Fr::from(v))
    }

    /// Parses a canonical big-endian scalar, rejecting values that are not
    /// strictly reduced mod n. Used at input boundaries (kPublic, note
    /// values) where the caller must supply an already-reduced element.
    pub fn from_bytes_be_strict(bytes: &[u8; 32]) -> Result<Self, AztecError> {
        let candidate = ark_bn254::Fr::from_be_bytes_mod_order(bytes);
        if candidate.into_bigint().to_bytes_be() != bytes.to_vec() {
            return Err(AztecError::ScalarTooBig);
        }
        Ok(GroupScalar(candidate))
    }

    /// Reduces an arbitrary 32-byte digest into the scalar field. Used only
    /// by the Keccak transcript's `finalize_and_reseed`, which by
    /// construction never needs the input to already be canonical.
    pub fn reduce_from_bytes(bytes: &[u8; 32]) -> Self {
        GroupScalar(ark_bn254::Fr::from_be_bytes_mod_order(bytes))
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        pad32(&self.0.into_bigint().to_bytes_be())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ark_bn254::Fr::from(0u64)
    }

    pub fn add(&self, other: &Self) -> Self {
        GroupScalar(self.0 + other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        GroupScalar(self.0 - other.0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        GroupScalar(self.0 * other.0)
    }

    pub fn neg(&self) -> Self {
        GroupScalar(-self.0)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(GroupScalar)
    }

    /// Cryptographically strong random scalar, reject-sampled from 32 random
    /// bytes until the candidate is both canonical and non-zero.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if let Ok(candidate) = Self::from_bytes_be_strict(&bytes) {
                if !candidate.is_zero() {
                    return candidate;
                }
            }
        }
    }
}

/// A coordinate in `[0, p)`, reduced modulo the BN128 base field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BaseField(pub(crate) ark_bn254::Fq);

impl BaseField {
    pub fn from_bytes_be_strict(bytes: &[u8; 32]) -> Result<Self, AztecError> {
        let candidate = ark_bn254::Fq::from_be_bytes_mod_order(bytes);
        if candidate.into_bigint().to_bytes_be() != bytes.to_vec() {
            return Err(AztecError::ScalarTooBig);
        }
        Ok(BaseField(candidate))
    }

    pub fn reduce_from_bytes(bytes: &[u8; 32]) -> Self {
        BaseField(ark_bn254::Fq::from_be_bytes_mod_order(bytes))
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        pad32(&self.0.into_bigint().to_bytes_be())
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if let Ok(candidate) = Self::from_bytes_be_strict(&bytes) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn scalar_round_trips_through_bytes() {
        let s = GroupScalar::from_u64(42);
        let bytes = s.to_bytes_be();
        let parsed = GroupScalar::from_bytes_be_strict(&bytes).unwrap();
        assert_eq!(s, parsed);
    }

    #[test]
    fn scalar_add_sub_inverse() {
        let a = GroupScalar::from_u64(7);
        let b = GroupScalar::from_u64(11);
        assert_eq!(a.add(&b).sub(&b), a);
        let inv = a.inverse().unwrap();
        assert_eq!(a.mul(&inv), GroupScalar::from_u64(1));
    }

    #[test]
    fn random_scalar_is_deterministic_under_seed() {
        let mut r1 = ChaCha20Rng::from_seed([7u8; 32]);
        let mut r2 = ChaCha20Rng::from_seed([7u8; 32]);
        assert_eq!(GroupScalar::random(&mut r1), GroupScalar::random(&mut r2));
    }

    #[test]
    fn scalar_too_big_is_rejected() {
        // n's big-endian bytes is itself not reduced: from_be_bytes_mod_order
        // wraps it to zero, which disagrees with the strict byte check.
        let n_bytes: [u8; 32] = {
            let modulus = ark_bn254::Fr::from(0u64) - ark_bn254::Fr::from(1u64);
            let mut b = pad32(&modulus.into_bigint().to_bytes_be());
            // b now holds n - 1; add one more to reach n exactly.
            for byte in b.iter_mut().rev() {
                if *byte == 0xff {
                    *byte = 0;
                } else {
                    *byte += 1;
                    break;
                }
            }
            b
        };
        assert!(GroupScalar::from_bytes_be_strict(&n_bytes).is_err());
    }

    #[test]
    fn base_field_round_trips() {
        let f = BaseField::reduce_from_bytes(&[3u8; 32]);
        let bytes = f.to_bytes_be();
        let parsed = BaseField::from_bytes_be_strict(&bytes).unwrap();
        assert_eq!(f, parsed);
    }
}
