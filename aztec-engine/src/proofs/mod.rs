//! Shared proof-construction utilities: input validation, the
//! Fiat–Shamir challenge, and the per-note response record every
//! constructor emits.

pub mod bilateral_swap;
pub mod burn;
pub mod dividend;
pub mod join_split;
pub mod mint;
pub mod private_range;

use crate::error::AztecError;
use crate::note::Note;
use crate::schema::BlindingFactor;
use crate::transcript::Keccak256Transcript;

/// One note's response record: `[kBar, aBar, gamma.x, gamma.y, sigma.x,
/// sigma.y]`, each a 32-byte big-endian field — the unit the ABI encoder
/// lays six of per note.
#[derive(Clone, Copy, Debug)]
pub struct ProofRecord {
    pub k_bar: [u8; 32],
    pub a_bar: [u8; 32],
    pub gamma_x: [u8; 32],
    pub gamma_y: [u8; 32],
    pub sigma_x: [u8; 32],
    pub sigma_y: [u8; 32],
}

impl ProofRecord {
    pub fn as_fields(&self) -> [[u8; 32]; 6] {
        [self.k_bar, self.a_bar, self.gamma_x, self.gamma_y, self.sigma_x, self.sigma_y]
    }
}

/// A completed proof: the per-note records plus the Fiat–Shamir challenge.
#[derive(Clone, Debug)]
pub struct ProofOutput {
    pub records: Vec<ProofRecord>,
    pub challenge: [u8; 32],
}

/// `parseInputs`: validates `m` and every note's curve membership
/// before any proof-specific algebra runs. `kPublic`'s canonical-range
/// check (`KPUBLIC_MALFORMED`) has no corresponding runtime branch here:
/// every constructor takes `kPublic` as an already-parsed `GroupScalar`,
/// which cannot represent an out-of-range value (see DESIGN.md).
pub fn parse_inputs(notes: &[Note], m: Option<usize>) -> Result<(), AztecError> {
    if let Some(m) = m {
        if m > notes.len() {
            return Err(AztecError::MTooBig);
        }
    }
    for note in notes {
        Note::validate(&note.gamma, &note.sigma, note.k)?;
        if note.a.is_zero() {
            return Err(AztecError::ViewingKeyMalformed);
        }
    }
    Ok(())
}

/// `computeChallenge`: hashes, in this exact order, `sender`, `m`
/// (if present), `kPublic` (if present), `publicOwner` (if present), every
/// note's `(gamma, sigma)`, then every blinding factor's `B` point.
pub fn compute_challenge(
    sender: &[u8; 20],
    m: Option<u64>,
    k_public: Option<&crate::field::GroupScalar>,
    public_owner: Option<&[u8; 20]>,
    notes: &[Note],
    blinding_factors: &[BlindingFactor],
) -> [u8; 32] {
    let mut transcript = Keccak256Transcript::new();
    transcript.append(&pad_address(sender));
    if let Some(m) = m {
        transcript.append(&pad_u64(m));
    }
    if let Some(k_public) = k_public {
        transcript.append_scalar(k_public);
    }
    if let Some(owner) = public_owner {
        transcript.append(&pad_address(owner));
    }
    for note in notes {
        transcript.append(&note.gamma.x_bytes());
        transcript.append(&note.gamma.y_bytes());
        transcript.append(&note.sigma.x_bytes());
        transcript.append(&note.sigma.y_bytes());
    }
    for bf in blinding_factors {
        transcript.append(&bf.b.x_bytes());
        transcript.append(&bf.b.y_bytes());
    }
    let challenge = transcript.finalize_and_reseed();
    challenge.to_bytes_be()
}

fn pad_address(addr: &[u8; 20]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(addr);
    out
}

fn pad_u64(v: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&v.to_be_bytes());
    out
}

/// `kBar = k*c + bk (mod n)`, `aBar = a*c + ba (mod n)` — the standard
/// response pair every constructor computes for a non-algebraic slot.
pub fn standard_responses(
    note: &Note,
    bf: &BlindingFactor,
    challenge: &crate::field::GroupScalar,
) -> (crate::field::GroupScalar, crate::field::GroupScalar) {
    let k_scalar = crate::field::GroupScalar::from_u64(note.k);
    let k_bar = k_scalar.mul(challenge).add(&bf.bk);
    let a_bar = note.a.mul(challenge).add(&bf.ba);
    (k_bar, a_bar)
}

pub fn record_from_note(
    note: &Note,
    k_bar: &crate::field::GroupScalar,
    a_bar: &crate::field::GroupScalar,
) -> ProofRecord {
    ProofRecord {
        k_bar: k_bar.to_bytes_be(),
        a_bar: a_bar.to_bytes_be(),
        gamma_x: note.gamma.x_bytes(),
        gamma_y: note.gamma.y_bytes(),
        sigma_x: note.sigma.x_bytes(),
        sigma_y: note.sigma.y_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::Crs;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn parse_inputs_rejects_m_too_big() {
        let crs = Crs::insecure_test_crs();
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        let note =
            Note::from_viewing_key(&crs, 10, crate::field::GroupScalar::from_u64(3), [0u8; 20], &mut rng)
                .unwrap();
        let err = parse_inputs(&[note], Some(2)).unwrap_err();
        assert_eq!(err, AztecError::MTooBig);
    }

    #[test]
    fn compute_challenge_is_deterministic() {
        let sender = [1u8; 20];
        let c1 = compute_challenge(&sender, Some(1), None, None, &[], &[]);
        let c2 = compute_challenge(&sender, Some(1), None, None, &[], &[]);
        assert_eq!(c1, c2);
    }

    #[test]
    fn compute_challenge_changes_with_m() {
        let sender = [1u8; 20];
        let c1 = compute_challenge(&sender, Some(1), None, None, &[], &[]);
        let c2 = compute_challenge(&sender, Some(2), None, None, &[], &[]);
        assert_ne!(c1, c2);
    }
}
