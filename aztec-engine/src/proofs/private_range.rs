//! Private range: proves `original >= comparison` using a third
//! "utility" note, without revealing any of the three values.
//!
//! The third response slot is not independently verifiable — the verifier
//! reconstructs it from the first two. This constructor emits a canonical
//! zero there rather than a random filler, so a filler value can never be
//! mistaken for meaningful data (see DESIGN.md).

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::error::AztecError;
use crate::field::GroupScalar;
use crate::note::Note;
use crate::schema::BlindingFactor;
use crate::transcript::Keccak256Transcript;

use super::{compute_challenge, parse_inputs, record_from_note, standard_responses, ProofOutput};

/// `notes = [original, comparison, utility]`.
pub fn prove<R: RngCore + CryptoRng>(
    crs: &Crs,
    notes: &[Note; 3],
    sender: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    parse_inputs(notes, None)?;

    let mut rolling = Keccak256Transcript::new();
    for note in notes {
        rolling.append(&note.gamma.x_bytes());
        rolling.append(&note.gamma.y_bytes());
        rolling.append(&note.sigma.x_bytes());
        rolling.append(&note.sigma.y_bytes());
    }
    let x = rolling.finalize_and_reseed();

    let bk0 = GroupScalar::random(rng);
    let bk1 = GroupScalar::random(rng);
    let ba0 = GroupScalar::random(rng);
    let ba1 = GroupScalar::random(rng);
    let ba2 = GroupScalar::random(rng);

    let b0 = notes[0].gamma.mul(&bk0).add(&crs.h.mul(&ba0));
    let b1 = notes[1].gamma.mul(&bk1.mul(&x)).add(&crs.h.mul(&ba1));
    let b2 = notes[2].gamma.mul(&bk0.sub(&bk1).mul(&x)).add(&crs.h.mul(&ba2));

    let blinding_factors = vec![
        BlindingFactor::with_point(bk0, ba0, b0),
        BlindingFactor::with_point(bk1, ba1, b1),
        BlindingFactor::with_point(bk0.sub(&bk1), ba2, b2),
    ];

    let challenge_bytes = compute_challenge(&sender, None, None, None, notes.as_slice(), &blinding_factors);
    let challenge = GroupScalar::reduce_from_bytes(&challenge_bytes);

    let mut records = Vec::with_capacity(3);
    for (note, bf) in notes.iter().zip(blinding_factors.iter()).take(2) {
        let (k_bar, a_bar) = standard_responses(note, bf, &challenge);
        records.push(record_from_note(note, &k_bar, &a_bar));
    }
    let (_, a_bar_2) = standard_responses(&notes[2], &blinding_factors[2], &challenge);
    let mut utility_record = record_from_note(&notes[2], &GroupScalar::zero(), &a_bar_2);
    utility_record.k_bar = [0u8; 32];
    records.push(utility_record);

    Ok(ProofOutput { records, challenge: challenge_bytes })
}
