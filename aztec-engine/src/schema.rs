//! Blinding-factor records shared by every proof constructor.
//!
//! Every proof constructor shares the same skeleton (draw blinding
//! factors, roll them into a challenge, compute responses) and differs
//! only in the linear relations the `{bk_i}` must satisfy — each
//! `proofs::*` module solves that relation itself and hands the result to
//! `BlindingFactor::new` (or `with_point`, for the non-standard `B`
//! formulas private-range needs).

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::curve::GroupPoint;
use crate::field::GroupScalar;

/// A single note's blinding-factor record: `(bk, ba, B)`, where
/// `B = bk*gamma + ba*h` (or a proof-specific variant — see each
/// constructor). Zeroed on drop since `bk`/`ba` participate in the
/// computation of the viewing key's masked responses.
pub struct BlindingFactor {
    pub bk: GroupScalar,
    pub ba: GroupScalar,
    pub b: GroupPoint,
}

impl BlindingFactor {
    pub fn new(bk: GroupScalar, ba: GroupScalar, gamma: &GroupPoint, crs: &Crs) -> Self {
        let b = gamma.mul(&bk).add(&crs.h.mul(&ba));
        BlindingFactor { bk, ba, b }
    }

    /// Builds a record whose `B` point is a proof-specific combination
    /// rather than the standard `bk*gamma + ba*h` (used by private-range's
    /// rolling-hash-scaled slots).
    pub fn with_point(bk: GroupScalar, ba: GroupScalar, b: GroupPoint) -> Self {
        BlindingFactor { bk, ba, b }
    }

    pub fn draw<R: RngCore + CryptoRng>(
        rng: &mut R,
        gamma: &GroupPoint,
        crs: &Crs,
    ) -> Self {
        let bk = GroupScalar::random(rng);
        let ba = GroupScalar::random(rng);
        Self::new(bk, ba, gamma, crs)
    }
}

impl Drop for BlindingFactor {
    fn drop(&mut self) {
        // GroupScalar has no public mutable access, so zero it in place via
        // raw pointers rather than reconstructing it through the field API.
        unsafe {
            let bk_ptr = &mut self.bk as *mut GroupScalar as *mut u8;
            for i in 0..std::mem::size_of::<GroupScalar>() {
                std::ptr::write_volatile(bk_ptr.add(i), 0);
            }
            let ba_ptr = &mut self.ba as *mut GroupScalar as *mut u8;
            for i in 0..std::mem::size_of::<GroupScalar>() {
                std::ptr::write_volatile(ba_ptr.add(i), 0);
            }
        }
        std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn draw_produces_consistent_b_point() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let gamma = GroupPoint::generator();
        let bf = BlindingFactor::draw(&mut rng, &gamma, &crs);
        let expected = gamma.mul(&bf.bk).add(&crs.h.mul(&bf.ba));
        assert_eq!(bf.b, expected);
    }
}
