//! Byte-precise ABI encoding: assembles a proof's per-note records,
//! header fields, and owner/metadata tail into the single hex blob a
//! validator contract expects, and decodes that blob back.
//!
//! Every fixed field is exactly 32 bytes, matching Ethereum's word size;
//! `ethabi`'s `U256`/`Address` types do the big-endian word encoding so the
//! layout here never hand-rolls the padding a calldata builder would
//! otherwise need to get byte-exact by hand.

use ethabi::ethereum_types::{Address, U256};
use sha3::{Digest, Keccak256};

use crate::error::AztecError;
use crate::proofs::{ProofOutput, ProofRecord};

const WORD: usize = 32;

fn word_from_u64(v: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    U256::from(v).to_big_endian(&mut bytes);
    bytes
}

fn word_from_address(addr: &[u8; 20]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[12..].copy_from_slice(Address::from_slice(addr).as_bytes());
    bytes
}

fn read_word(bytes: &[u8], offset: usize) -> Result<[u8; 32], AztecError> {
    bytes
        .get(offset..offset + WORD)
        .map(|s| {
            let mut out = [0u8; 32];
            out.copy_from_slice(s);
            out
        })
        .ok_or(AztecError::EncodingInvalidLength)
}

/// Metadata for one output note: its hash plus the encrypted ephemeral key
/// a recipient needs to recover its viewing key.
#[derive(Clone, Debug)]
pub struct OutputNoteMetadata {
    pub note_hash: [u8; 32],
    pub encrypted_ephemeral_key: Vec<u8>,
}

/// The full set of fields the ABI encoder lays out around a proof's
/// per-note records.
#[derive(Clone, Debug)]
pub struct EncodedProofInputs<'a> {
    pub proof: &'a ProofOutput,
    pub m: Option<u64>,
    pub public_owner: [u8; 20],
    pub k_public: Option<[u8; 32]>,
    pub input_owners: Vec<[u8; 20]>,
    pub output_owners: Vec<[u8; 20]>,
    pub output_notes: Vec<OutputNoteMetadata>,
}

#[derive(Clone, Debug)]
pub struct DecodedProof {
    pub challenge: [u8; 32],
    pub m: Option<u64>,
    pub public_owner: [u8; 20],
    pub k_public: Option<[u8; 32]>,
    pub records: Vec<ProofRecord>,
    pub input_owners: Vec<[u8; 20]>,
    pub output_owners: Vec<[u8; 20]>,
    pub output_notes: Vec<OutputNoteMetadata>,
}

/// Lays out: total length, challenge, m, publicOwner, kPublic, a
/// length-prefixed array of note records, then the owner arrays and output
/// note metadata.
pub fn encode(inputs: &EncodedProofInputs) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&inputs.proof.challenge);
    body.extend_from_slice(&word_from_u64(inputs.m.unwrap_or(0)));
    body.extend_from_slice(&word_from_address(&inputs.public_owner));
    body.extend_from_slice(&inputs.k_public.unwrap_or([0u8; 32]));

    body.extend_from_slice(&word_from_u64(inputs.proof.records.len() as u64));
    for record in &inputs.proof.records {
        body.extend_from_slice(&word_from_u64(6));
        for field in record.as_fields() {
            body.extend_from_slice(&field);
        }
    }

    body.extend_from_slice(&word_from_u64(inputs.input_owners.len() as u64));
    for owner in &inputs.input_owners {
        body.extend_from_slice(&word_from_address(owner));
    }

    body.extend_from_slice(&word_from_u64(inputs.output_owners.len() as u64));
    for owner in &inputs.output_owners {
        body.extend_from_slice(&word_from_address(owner));
    }

    body.extend_from_slice(&word_from_u64(inputs.output_notes.len() as u64));
    for note in &inputs.output_notes {
        body.extend_from_slice(&note.note_hash);
        body.extend_from_slice(&word_from_u64(note.encrypted_ephemeral_key.len() as u64));
        body.extend_from_slice(&note.encrypted_ephemeral_key);
        let padding = (WORD - note.encrypted_ephemeral_key.len() % WORD) % WORD;
        body.extend(std::iter::repeat(0u8).take(padding));
    }

    let mut out = Vec::with_capacity(WORD + body.len());
    out.extend_from_slice(&word_from_u64(body.len() as u64));
    out.extend_from_slice(&body);
    out
}

pub fn decode(bytes: &[u8]) -> Result<DecodedProof, AztecError> {
    let total_len = U256::from_big_endian(&read_word(bytes, 0)?).as_usize();
    if bytes.len() < WORD + total_len {
        return Err(AztecError::EncodingInvalidLength);
    }
    let mut cursor = WORD;

    let challenge = read_word(bytes, cursor)?;
    cursor += WORD;
    let m_raw = U256::from_big_endian(&read_word(bytes, cursor)?);
    cursor += WORD;
    let public_owner_word = read_word(bytes, cursor)?;
    let mut public_owner = [0u8; 20];
    public_owner.copy_from_slice(&public_owner_word[12..]);
    cursor += WORD;
    let k_public = read_word(bytes, cursor)?;
    cursor += WORD;

    let record_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut records = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        let field_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
        cursor += WORD;
        if field_count != 6 {
            return Err(AztecError::EncodingInvalidLength);
        }
        let mut fields = [[0u8; 32]; 6];
        for field in &mut fields {
            *field = read_word(bytes, cursor)?;
            cursor += WORD;
        }
        records.push(ProofRecord {
            k_bar: fields[0],
            a_bar: fields[1],
            gamma_x: fields[2],
            gamma_y: fields[3],
            sigma_x: fields[4],
            sigma_y: fields[5],
        });
    }

    let input_owner_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut input_owners = Vec::with_capacity(input_owner_count);
    for _ in 0..input_owner_count {
        let word = read_word(bytes, cursor)?;
        let mut owner = [0u8; 20];
        owner.copy_from_slice(&word[12..]);
        input_owners.push(owner);
        cursor += WORD;
    }

    let output_owner_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut output_owners = Vec::with_capacity(output_owner_count);
    for _ in 0..output_owner_count {
        let word = read_word(bytes, cursor)?;
        let mut owner = [0u8; 20];
        owner.copy_from_slice(&word[12..]);
        output_owners.push(owner);
        cursor += WORD;
    }

    let output_note_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut output_notes = Vec::with_capacity(output_note_count);
    for _ in 0..output_note_count {
        let note_hash = read_word(bytes, cursor)?;
        cursor += WORD;
        let key_len = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
        cursor += WORD;
        let key = bytes
            .get(cursor..cursor + key_len)
            .ok_or(AztecError::EncodingInvalidLength)?
            .to_vec();
        cursor += key_len;
        let padding = (WORD - key_len % WORD) % WORD;
        cursor += padding;
        output_notes.push(OutputNoteMetadata { note_hash, encrypted_ephemeral_key: key });
    }

    Ok(DecodedProof {
        challenge,
        m: if m_raw.is_zero() { None } else { Some(m_raw.as_u64()) },
        public_owner,
        k_public: if k_public == [0u8; 32] { None } else { Some(k_public) },
        records,
        input_owners,
        output_owners,
        output_notes,
    })
}

/// The pre-image `encodeProofOutputs` ABI-encodes: declared input/output
/// note hashes plus `publicOwner` and `kPublic`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofOutputsEntry {
    pub input_note_hashes: Vec<[u8; 32]>,
    pub output_note_hashes: Vec<[u8; 32]>,
    pub public_owner: [u8; 20],
    pub k_public: [u8; 32],
}

pub fn encode_proof_outputs(entry: &ProofOutputsEntry) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&word_from_u64(entry.input_note_hashes.len() as u64));
    for hash in &entry.input_note_hashes {
        out.extend_from_slice(hash);
    }
    out.extend_from_slice(&word_from_u64(entry.output_note_hashes.len() as u64));
    for hash in &entry.output_note_hashes {
        out.extend_from_slice(hash);
    }
    out.extend_from_slice(&word_from_address(&entry.public_owner));
    out.extend_from_slice(&entry.k_public);
    out
}

pub fn decode_proof_outputs(bytes: &[u8]) -> Result<ProofOutputsEntry, AztecError> {
    let mut cursor = 0;
    let input_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut input_note_hashes = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        input_note_hashes.push(read_word(bytes, cursor)?);
        cursor += WORD;
    }
    let output_count = U256::from_big_endian(&read_word(bytes, cursor)?).as_usize();
    cursor += WORD;
    let mut output_note_hashes = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        output_note_hashes.push(read_word(bytes, cursor)?);
        cursor += WORD;
    }
    let owner_word = read_word(bytes, cursor)?;
    let mut public_owner = [0u8; 20];
    public_owner.copy_from_slice(&owner_word[12..]);
    cursor += WORD;
    let k_public = read_word(bytes, cursor)?;

    Ok(ProofOutputsEntry { input_note_hashes, output_note_hashes, public_owner, k_public })
}

/// The 32-byte "expected output" a validator returns on acceptance:
/// `Keccak256(encode_proof_outputs(entry))`.
pub fn hash_proof_outputs(entry: &ProofOutputsEntry) -> [u8; 32] {
    Keccak256::digest(encode_proof_outputs(entry)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proof() -> ProofOutput {
        ProofOutput {
            records: vec![ProofRecord {
                k_bar: [1u8; 32],
                a_bar: [2u8; 32],
                gamma_x: [3u8; 32],
                gamma_y: [4u8; 32],
                sigma_x: [5u8; 32],
                sigma_y: [6u8; 32],
            }],
            challenge: [7u8; 32],
        }
    }

    #[test]
    fn encode_decode_round_trips() {
        let proof = sample_proof();
        let inputs = EncodedProofInputs {
            proof: &proof,
            m: Some(1),
            public_owner: [9u8; 20],
            k_public: Some([8u8; 32]),
            input_owners: vec![[1u8; 20]],
            output_owners: vec![[2u8; 20]],
            output_notes: vec![OutputNoteMetadata {
                note_hash: [3u8; 32],
                encrypted_ephemeral_key: vec![1, 2, 3, 4, 5],
            }],
        };
        let encoded = encode(&inputs);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.challenge, proof.challenge);
        assert_eq!(decoded.m, Some(1));
        assert_eq!(decoded.public_owner, [9u8; 20]);
        assert_eq!(decoded.k_public, Some([8u8; 32]));
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.input_owners, vec![[1u8; 20]]);
        assert_eq!(decoded.output_owners, vec![[2u8; 20]]);
        assert_eq!(decoded.output_notes[0].encrypted_ephemeral_key, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn re_encoding_a_decoded_proof_matches_original() {
        let proof = sample_proof();
        let inputs = EncodedProofInputs {
            proof: &proof,
            m: None,
            public_owner: [0u8; 20],
            k_public: None,
            input_owners: vec![],
            output_owners: vec![],
            output_notes: vec![],
        };
        let encoded = encode(&inputs);
        let decoded = decode(&encoded).unwrap();
        let re_encoded = encode(&EncodedProofInputs {
            proof: &ProofOutput { records: decoded.records.clone(), challenge: decoded.challenge },
            m: decoded.m,
            public_owner: decoded.public_owner,
            k_public: decoded.k_public,
            input_owners: decoded.input_owners.clone(),
            output_owners: decoded.output_owners.clone(),
            output_notes: decoded.output_notes.clone(),
        });
        assert_eq!(encoded, re_encoded);
    }

    #[test]
    fn truncated_blob_fails_with_encoding_invalid_length() {
        let err = decode(&[0u8; 10]).unwrap_err();
        assert_eq!(err, AztecError::EncodingInvalidLength);
    }

    #[test]
    fn hash_proof_outputs_is_deterministic() {
        let entry = ProofOutputsEntry {
            input_note_hashes: vec![[1u8; 32]],
            output_note_hashes: vec![[2u8; 32], [3u8; 32]],
            public_owner: [4u8; 20],
            k_public: [5u8; 32],
        };
        assert_eq!(hash_proof_outputs(&entry), hash_proof_outputs(&entry));
    }

    #[test]
    fn decode_proof_outputs_inverts_encode_proof_outputs() {
        let entry = ProofOutputsEntry {
            input_note_hashes: vec![[1u8; 32], [2u8; 32]],
            output_note_hashes: vec![[3u8; 32]],
            public_owner: [6u8; 20],
            k_public: [7u8; 32],
        };
        let bytes = encode_proof_outputs(&entry);
        assert_eq!(decode_proof_outputs(&bytes).unwrap(), entry);
    }
}
