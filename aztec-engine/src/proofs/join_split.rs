//! The canonical join-split proof: `m` input notes balanced against
//! the remaining output notes plus a public value `kPublic`.

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::error::AztecError;
use crate::field::GroupScalar;
use crate::note::Note;
use crate::schema::BlindingFactor;
use crate::transcript::Keccak256Transcript;

use super::{compute_challenge, parse_inputs, record_from_note, standard_responses, ProofOutput};

/// Constructs a join-split proof over `notes[0..m]` (inputs) and
/// `notes[m..]` (outputs), balanced against `k_public`.
pub fn prove<R: RngCore + CryptoRng>(
    crs: &Crs,
    notes: &[Note],
    m: usize,
    k_public: GroupScalar,
    sender: [u8; 20],
    public_owner: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    if notes.is_empty() {
        return Err(AztecError::IncorrectNoteNumber);
    }
    if m > notes.len() {
        return Err(AztecError::MTooBig);
    }
    parse_inputs(notes, Some(m))?;

    let mut rolling = Keccak256Transcript::new();
    for note in notes {
        rolling.append(&note.gamma.x_bytes());
        rolling.append(&note.gamma.y_bytes());
        rolling.append(&note.sigma.x_bytes());
        rolling.append(&note.sigma.y_bytes());
    }
    let bk_public = rolling.clone().append_scalar(&k_public).finalize_and_reseed();

    // Draw independent blinding scalars for every note except the last
    // input note (index m-1), whose bk is solved to satisfy the balance.
    let last_input = m.checked_sub(1).ok_or(AztecError::IncorrectNoteNumber)?;
    let mut bks: Vec<GroupScalar> = Vec::with_capacity(notes.len());
    let mut bas: Vec<GroupScalar> = Vec::with_capacity(notes.len());
    for i in 0..notes.len() {
        if i == last_input {
            bks.push(GroupScalar::zero());
        } else {
            bks.push(GroupScalar::random(rng));
        }
        bas.push(GroupScalar::random(rng));
    }

    // sum_{i<m} bk_i - sum_{i>=m} bk_i = bk_public
    let mut sum_inputs_except_last = GroupScalar::zero();
    for bk in bks.iter().take(last_input) {
        sum_inputs_except_last = sum_inputs_except_last.add(bk);
    }
    let mut sum_outputs = GroupScalar::zero();
    for bk in bks.iter().skip(m) {
        sum_outputs = sum_outputs.add(bk);
    }
    bks[last_input] = bk_public.add(&sum_outputs).sub(&sum_inputs_except_last);

    let blinding_factors: Vec<BlindingFactor> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| BlindingFactor::new(bks[i], bas[i], &note.gamma, crs))
        .collect();

    let challenge_bytes =
        compute_challenge(&sender, Some(m as u64), Some(&k_public), Some(&public_owner), notes, &blinding_factors);
    let challenge = GroupScalar::reduce_from_bytes(&challenge_bytes);

    let mut records = Vec::with_capacity(notes.len());
    for (note, bf) in notes.iter().zip(blinding_factors.iter()) {
        let (k_bar, a_bar) = standard_responses(note, bf, &challenge);
        records.push(record_from_note(note, &k_bar, &a_bar));
    }
    // Canonical convention: the final record's kBar slot carries kPublic
    // directly rather than the computed response.
    if let Some(last) = records.last_mut() {
        last.k_bar = k_public.to_bytes_be();
    }

    Ok(ProofOutput { records, challenge: challenge_bytes })
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
    fn join_split_produces_one_record_per_note() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let notes: Vec<Note> = [10u64, 20, 5, 15, 10].iter().map(|&k| make_note(&crs, k, &mut rng)).collect();
        let out = prove(&crs, &notes, 2, GroupScalar::zero(), [1u8; 20], [2u8; 20], &mut rng).unwrap();
        assert_eq!(out.records.len(), 5);
    }

    #[test]
    fn last_record_carries_k_public_canonically() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([6u8; 32]);
        let notes: Vec<Note> = [10u64, 20, 5, 15, 10].iter().map(|&k| make_note(&crs, k, &mut rng)).collect();
        let out = prove(&crs, &notes, 2, GroupScalar::zero(), [1u8; 20], [2u8; 20], &mut rng).unwrap();
        assert_eq!(out.records.last().unwrap().k_bar, [0u8; 32]);
    }

    #[test]
    fn rejects_m_greater_than_note_count() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let notes = vec![make_note(&crs, 10, &mut rng)];
        let err = prove(&crs, &notes, 5, GroupScalar::zero(), [1u8; 20], [2u8; 20], &mut rng).unwrap_err();
        assert_eq!(err, AztecError::MTooBig);
    }

    #[test]
    fn rejects_empty_notes_as_incorrect_note_number() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
        let err = prove(&crs, &[], 0, GroupScalar::zero(), [1u8; 20], [2u8; 20], &mut rng).unwrap_err();
        assert_eq!(err, AztecError::IncorrectNoteNumber);
    }
}
