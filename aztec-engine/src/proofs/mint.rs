//! Mint: a join-split restricted to one "current total" input note,
//! one "new total" output note, and the freshly minted notes, with the
//! `kPublic` slot repurposed to carry the new total's commitment hash.

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::error::AztecError;
use crate::field::GroupScalar;
use crate::note::Note;

use super::{join_split, ProofOutput};

pub fn prove<R: RngCore + CryptoRng>(
    crs: &Crs,
    current_total: &Note,
    new_total: &Note,
    minted: &[Note],
    sender: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    let mut notes = Vec::with_capacity(2 + minted.len());
    notes.push(*current_total);
    notes.push(*new_total);
    notes.extend_from_slice(minted);

    let k_public = GroupScalar::reduce_from_bytes(&new_total.note_hash());
    join_split::prove(crs, &notes, 1, k_public, sender, new_total.owner, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn make_note<R: RngCore + CryptoRng>(crs: &Crs, k: u64, rng: &mut R) -> Note {
        Note::from_viewing_key(crs, k, GroupScalar::from_u64(k + 1), [0u8; 20], rng).unwrap()
    }

    #[test]
    fn mint_produces_record_per_note() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([17u8; 32]);
        let current_total = make_note(&crs, 0, &mut rng);
        let new_total = make_note(&crs, 30, &mut rng);
        let minted = [make_note(&crs, 10, &mut rng), make_note(&crs, 20, &mut rng)];
        let out = prove(&crs, &current_total, &new_total, &minted, [1u8; 20], &mut rng).unwrap();
        assert_eq!(out.records.len(), 4);
    }
}
