//! Burn: a join-split restricted to one "current total" input note,
//! one "new total" output note, and the notes being burned, with the
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
    burned: &[Note],
    sender: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    let mut notes = Vec::with_capacity(2 + burned.len());
    notes.push(*current_total);
    notes.push(*new_total);
    notes.extend_from_slice(burned);

    let k_public = GroupScalar::reduce_from_bytes(&new_total.note_hash());
    join_split::prove(crs, &notes, 1, k_public, sender, new_total.owner, rng)
}
