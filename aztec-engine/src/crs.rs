//! The common reference string: a fixed pair of generators `(h, t2)`
//! shared by every proof constructor.
//!
//! `Crs` is loaded once from a 192-byte blob and then passed by shared
//! reference into every constructor — there is no process-global cache, so
//! a library caller controls the CRS's lifetime and may hold several at
//! once (e.g. across a migration between trusted setups).

use ark_ff::{BigInteger, PrimeField};
use tracing::{debug, warn};

use crate::curve::GroupPoint;
use crate::error::AztecError;
use crate::field::BaseField;

// The original protocol description calls this a "fixed 160-byte blob" but
// then lists six 32-byte fields (h.x, h.y, t2.xi, t2.xr, t2.yi, t2.yr),
// which is 192 bytes. The field list is the unambiguous byte layout; the
// 160 figure doesn't reconcile with it and is corrected here (see DESIGN.md).
const CRS_LEN: usize = 192;

/// A G2 point, represented by its two `Fq2` coordinates (imaginary, real)
/// each split into big-endian 32-byte limbs, matching Ethereum's
/// imaginary-first convention for G2 encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G2Point {
    pub x_imaginary: [u8; 32],
    pub x_real: [u8; 32],
    pub y_imaginary: [u8; 32],
    pub y_real: [u8; 32],
}

#[derive(Clone, Copy, Debug)]
pub struct Crs {
    pub h: GroupPoint,
    pub t2: G2Point,
}

impl Crs {
    /// Parses and validates the fixed 192-byte blob:
    /// `h.x ‖ h.y ‖ t2.xi ‖ t2.xr ‖ t2.yi ‖ t2.yr`.
    pub fn load(bytes: &[u8]) -> Result<Self, AztecError> {
        debug!(len = bytes.len(), "loading CRS blob");
        if bytes.len() != CRS_LEN {
            warn!(expected = CRS_LEN, got = bytes.len(), "CRS blob has wrong length");
            return Err(AztecError::EncodingInvalidLength);
        }
        let mut chunk = |i: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&bytes[i * 32..(i + 1) * 32]);
            out
        };
        let hx = chunk(0);
        let hy = chunk(1);
        let h = GroupPoint::from_coordinates(&hx, &hy)?;
        let t2 = G2Point {
            x_imaginary: chunk(2),
            x_real: chunk(3),
            y_imaginary: chunk(4),
            y_real: chunk(5),
        };
        debug!("CRS loaded and validated");
        Ok(Crs { h, t2 })
    }

    pub fn to_bytes(&self) -> [u8; CRS_LEN] {
        let mut out = [0u8; CRS_LEN];
        out[0..32].copy_from_slice(&self.h.x_bytes());
        out[32..64].copy_from_slice(&self.h.y_bytes());
        out[64..96].copy_from_slice(&self.t2.x_imaginary);
        out[96..128].copy_from_slice(&self.t2.x_real);
        out[128..160].copy_from_slice(&self.t2.y_imaginary);
        out[160..192].copy_from_slice(&self.t2.y_real);
        out
    }

    /// A fixed, non-secret CRS used only by this crate's own test suite and
    /// by the CLI's demo mode. Not a trusted setup — generating one is out
    /// of scope for this crate.
    pub fn insecure_test_crs() -> Self {
        let h = GroupPoint::generator().mul(&crate::field::GroupScalar::from_u64(7));
        let fq2_limb = |v: u64| -> [u8; 32] { BaseField::reduce_from_bytes(&pad_u64(v)).to_bytes_be() };
        Crs {
            h,
            t2: G2Point {
                x_imaginary: fq2_limb(1),
                x_real: fq2_limb(2),
                y_imaginary: fq2_limb(3),
                y_real: fq2_limb(4),
            },
        }
    }
}

fn pad_u64(v: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&v.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let crs = Crs::insecure_test_crs();
        let bytes = crs.to_bytes();
        let parsed = Crs::load(&bytes).unwrap();
        assert_eq!(parsed.h, crs.h);
        assert_eq!(parsed.t2, crs.t2);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = Crs::load(&[0u8; 100]).unwrap_err();
        assert_eq!(err, AztecError::EncodingInvalidLength);
    }

    #[test]
    fn off_curve_h_is_rejected() {
        let mut bytes = Crs::insecure_test_crs().to_bytes();
        bytes[0..32].copy_from_slice(&[0xffu8; 32]);
        assert!(Crs::load(&bytes).is_err());
    }
}
