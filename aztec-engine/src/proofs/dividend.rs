//! Dividend computation: proves `za*k_target = zb*k_principal +
//! k_residual` in zero knowledge over three notes, without revealing any
//! of the three values.

use rand::{CryptoRng, RngCore};

use crate::crs::Crs;
use crate::error::AztecError;
use crate::field::GroupScalar;
use crate::note::Note;
use crate::schema::BlindingFactor;

use super::{compute_challenge, parse_inputs, record_from_note, standard_responses, ProofOutput};

/// `notes = [principal, residual, target]`.
pub fn prove<R: RngCore + CryptoRng>(
    crs: &Crs,
    notes: &[Note; 3],
    za: u64,
    zb: u64,
    sender: [u8; 20],
    rng: &mut R,
) -> Result<ProofOutput, AztecError> {
    parse_inputs(notes, None)?;

    let za_scalar = GroupScalar::from_u64(za);
    let zb_scalar = GroupScalar::from_u64(zb);

    // The za*k_target = zb*k_principal + k_residual relation is enforced
    // only through the blinding-factor algebra below and the challenge
    // equation a verifier recomputes; an inconsistent statement simply
    // yields a proof that will not verify, matching how a real sigma
    // protocol prover behaves (it does not pre-check the statement).
    let bk_principal = GroupScalar::random(rng);
    let bk_target = GroupScalar::random(rng);
    let bk_residual = za_scalar.mul(&bk_target).sub(&zb_scalar.mul(&bk_principal));
    let bks = [bk_principal, bk_residual, bk_target];
    let bas: [GroupScalar; 3] = std::array::from_fn(|_| GroupScalar::random(rng));

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

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn make_note<R: RngCore + CryptoRng>(crs: &Crs, k: u64, rng: &mut R) -> Note {
        Note::from_viewing_key(crs, k, GroupScalar::from_u64(k + 1), [0u8; 20], rng).unwrap()
    }

    #[test]
    fn dividend_emits_eighteen_fields() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
        let notes = [make_note(&crs, 90, &mut rng), make_note(&crs, 4, &mut rng), make_note(&crs, 50, &mut rng)];
        let out = prove(&crs, &notes, 100, 5, [1u8; 20], &mut rng).unwrap();
        assert_eq!(out.records.len() * 6, 18);
    }
}
