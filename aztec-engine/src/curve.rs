//! BN128 G1 group points.
//!
//! `GroupPoint` wraps `ark_bn254::G1Affine` and is the only type through
//! which callers touch curve points — `field::BaseField` never leaks out of
//! coordinate getters into arithmetic a caller could mistake for a scalar
//! operation.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField, Zero};

use crate::error::AztecError;
use crate::field::{BaseField, GroupScalar};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GroupPoint(pub(crate) ark_bn254::G1Affine);

impl GroupPoint {
    pub fn generator() -> Self {
        GroupPoint(ark_bn254::G1Affine::generator())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a pair of big-endian coordinates, checking both canonical
    /// reduction mod p and membership on the curve `y^2 = x^3 + 3`.
    pub fn from_coordinates(x: &[u8; 32], y: &[u8; 32]) -> Result<Self, AztecError> {
        let x_field = BaseField::from_bytes_be_strict(x)?;
        let y_field = BaseField::from_bytes_be_strict(y)?;
        let point = ark_bn254::G1Affine::new_unchecked(x_field.0, y_field.0);
        if !point.is_on_curve() {
            return Err(AztecError::NotOnCurve);
        }
        if point.is_zero() {
            return Err(AztecError::PointAtInfinity);
        }
        Ok(GroupPoint(point))
    }

    pub fn x_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let bytes = self.0.x().map(|x| x.into_bigint().to_bytes_be()).unwrap_or_default();
        let start = 32 - bytes.len();
        out[start..].copy_from_slice(&bytes);
        out
    }

    pub fn y_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let bytes = self.0.y().map(|y| y.into_bigint().to_bytes_be()).unwrap_or_default();
        let start = 32 - bytes.len();
        out[start..].copy_from_slice(&bytes);
        out
    }

    pub fn add(&self, other: &Self) -> Self {
        GroupPoint((self.0.into_group() + other.0.into_group()).into_affine())
    }

    pub fn neg(&self) -> Self {
        GroupPoint(-self.0)
    }

    /// Scalar multiplication `scalar * self`.
    pub fn mul(&self, scalar: &GroupScalar) -> Self {
        GroupPoint((self.0.into_group() * scalar.0).into_affine())
    }
}
