//! Bilateral swap: two input notes swapped against two output
//! notes, with shared blinding factors enforcing pairwise value equality.

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::error::AztecError;
use crate::field::GroupScalar;
use crate::note::Note;
use crate::schema::BlindingFactor;

use super::{compute_challenge, parse_inputs, record_from_note, standard_responses, ProofOutput};

/// Proves `notes[0]` and `notes[2]` carry equal value, and likewise
/// `notes[1]` and `notes[3]`, by constraining `bk_1 = bk_3` and
/// `bk_2 = bk_4` (1-indexed) across the pairs.
pub fn prove<R: RngCore + CryptoRng>(
    crs: &Crs,
    notes: &[Note; 4],
    sender: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    parse_inputs(notes, None)?;

    let bk_first_pair = GroupScalar::random(rng);
    let bk_second_pair = GroupScalar::random(rng);
    let bks = [bk_first_pair, bk_second_pair, bk_first_pair, bk_second_pair];
    let bas: [GroupScalar; 4] = std::array::from_fn(|_| GroupScalar::random(rng));

    let blinding_factors: Vec<BlindingFactor> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| BlindingFactor::new(bks[i], bas[i], &note.gamma, crs))
        .collect();

    let challenge_bytes = compute_challenge(&sender, None, None, None, notes.as_slice(), &blinding_factors);
    let challenge = GroupScalar::reduce_from_bytes(&challenge_bytes);

    let records = notes
        .iter()
        .zip(blinding_factors.iter())
        .map(|(note, bf)| {
            let (k_bar, a_bar) = standard_responses(note, bf, &challenge);
            record_from_note(note, &k_bar, &a_bar)
        })
        .collect();

    Ok(ProofOutput { records, challenge: challenge_bytes })
}
