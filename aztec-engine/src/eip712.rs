//! EIP-712 note-signature verification.
//!
//! The core does not *produce* note signatures — that is wallet-layer and
//! out of scope for this crate — but it does consume a pre-computed `(v, r, s)`
//! triple to recover and check the signer, which a validator needs to
//! confirm spending authorization. Recovery uses `secp256k1`, the same
//! crate `cheng-chun-yuan-zVault` pulls in for its own address recovery.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};
use sha3::{Digest, Keccak256};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signer address cannot be 0")]
    ZeroSigner,
    #[error("malformed recovery id")]
    MalformedRecoveryId,
    #[error("signature does not recover to a valid public key")]
    RecoveryFailed,
}

/// `{name: "AZTEC_MAIN", version, verifyingContract, chainId}`.
pub struct Eip712Domain {
    pub name: &'static str,
    pub version: &'static str,
    pub verifying_contract: [u8; 20],
    pub chain_id: u64,
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Eip712Domain {
            name: "AZTEC_MAIN",
            version: "2",
            verifying_contract: [0u8; 20],
            chain_id: 1,
        }
    }
}

const DOMAIN_TYPEHASH_PREIMAGE: &[u8] =
    b"EIP712Domain(string name,string version,address verifyingContract,uint256 chainId)";

const NOTE_SIGNATURE_TYPEHASH_PREIMAGE: &[u8] =
    b"NoteSignature(bytes32 noteHash,address spender,bool status)";

impl Eip712Domain {
    pub fn separator(&self) -> [u8; 32] {
        let domain_typehash: [u8; 32] = Keccak256::digest(DOMAIN_TYPEHASH_PREIMAGE).into();
        let name_hash: [u8; 32] = Keccak256::digest(self.name.as_bytes()).into();
        let version_hash: [u8; 32] = Keccak256::digest(self.version.as_bytes()).into();

        let mut preimage = Vec::with_capacity(32 * 4);
        preimage.extend_from_slice(&domain_typehash);
        preimage.extend_from_slice(&name_hash);
        preimage.extend_from_slice(&version_hash);
        preimage.extend_from_slice(&pad_address(&self.verifying_contract));
        preimage.extend_from_slice(&pad_u64(self.chain_id));
        Keccak256::digest(preimage).into()
    }
}

/// The `{noteHash, spender, status}` struct a note signature authorizes.
pub struct NoteSignatureSchema {
    pub note_hash: [u8; 32],
    pub spender: [u8; 20],
    pub status: bool,
}

impl NoteSignatureSchema {
    pub fn struct_hash(&self) -> [u8; 32] {
        let typehash: [u8; 32] = Keccak256::digest(NOTE_SIGNATURE_TYPEHASH_PREIMAGE).into();
        let mut preimage = Vec::with_capacity(32 * 3);
        preimage.extend_from_slice(&typehash);
        preimage.extend_from_slice(&self.note_hash);
        preimage.extend_from_slice(&pad_address(&self.spender));
        preimage.extend_from_slice(&pad_bool(self.status));
        Keccak256::digest(preimage).into()
    }
}

/// `keccak256(0x1901 ‖ domainSeparator ‖ structHash)`, the digest an EIP-712
/// signature is actually computed over.
pub fn digest(domain: &Eip712Domain, schema: &NoteSignatureSchema) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(&domain.separator());
    preimage.extend_from_slice(&schema.struct_hash());
    Keccak256::digest(preimage).into()
}

/// Recovers the signer's 20-byte Ethereum address from an opaque `(v, r, s)`
/// triple over `digest`. Follows Ethereum's `ecrecover` convention strictly:
/// only `v ∈ {27, 28}` is a legitimate recovery id. Any other `v` — notably
/// the bare `0`/`1` recovery ids some other chains accept directly — is
/// rejected up front as a zero signer rather than fed into real recovery.
pub fn recover_signer(
    domain: &Eip712Domain,
    schema: &NoteSignatureSchema,
    v: u8,
    r: &[u8; 32],
    s: &[u8; 32],
) -> Result<[u8; 20], SignatureError> {
    let recovery_id = match v {
        27 | 28 => v - 27,
        _ => return Err(SignatureError::ZeroSigner),
    };
    let rec_id = RecoveryId::from_i32(recovery_id as i32).map_err(|_| SignatureError::MalformedRecoveryId)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);
    let signature = RecoverableSignature::from_compact(&sig_bytes, rec_id)
        .map_err(|_| SignatureError::MalformedRecoveryId)?;

    let msg_digest = digest(domain, schema);
    let message = Message::from_digest(msg_digest);

    let pubkey = SECP256K1.recover_ecdsa(&message, &signature).map_err(|_| SignatureError::RecoveryFailed)?;
    let uncompressed = pubkey.serialize_uncompressed();
    // Ethereum address = last 20 bytes of keccak256(pubkey.x || pubkey.y),
    // dropping the leading 0x04 tag byte.
    let hash: [u8; 32] = Keccak256::digest(&uncompressed[1..]).into();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);

    if address == [0u8; 20] {
        return Err(SignatureError::ZeroSigner);
    }
    Ok(address)
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

fn pad_bool(b: bool) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[31] = b as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::SecretKey;

    #[test]
    fn v_zero_is_rejected_as_zero_signer_without_attempting_recovery() {
        // v=0 is not a valid Ethereum recovery id, even though it decodes to
        // a valid secp256k1 recovery id (0). A genuine, otherwise-valid
        // signature must still be rejected, not recovered.
        let domain = Eip712Domain::default();
        let schema = NoteSignatureSchema { note_hash: [1u8; 32], spender: [2u8; 20], status: true };
        let secret_key = SecretKey::from_slice(&[0x11u8; 32]).unwrap();
        let msg = Message::from_digest(digest(&domain, &schema));
        let (_, sig_bytes) = SECP256K1.sign_ecdsa_recoverable(&msg, &secret_key).serialize_compact();

        let err = recover_signer(&domain, &schema, 0, &sig_bytes[..32].try_into().unwrap(), &sig_bytes[32..].try_into().unwrap())
            .unwrap_err();
        assert_eq!(err, SignatureError::ZeroSigner);
    }

    #[test]
    fn v_27_or_28_recovers_a_genuine_signer() {
        let domain = Eip712Domain::default();
        let schema = NoteSignatureSchema { note_hash: [1u8; 32], spender: [2u8; 20], status: true };
        let secret_key = SecretKey::from_slice(&[0x11u8; 32]).unwrap();
        let msg = Message::from_digest(digest(&domain, &schema));
        let (rec_id, sig_bytes) = SECP256K1.sign_ecdsa_recoverable(&msg, &secret_key).serialize_compact();
        let v = 27 + rec_id.to_i32() as u8;

        let address =
            recover_signer(&domain, &schema, v, &sig_bytes[..32].try_into().unwrap(), &sig_bytes[32..].try_into().unwrap())
                .unwrap();
        assert_ne!(address, [0u8; 20]);
    }

    #[test]
    fn malformed_v_is_rejected_as_zero_signer() {
        let domain = Eip712Domain::default();
        let schema = NoteSignatureSchema { note_hash: [1u8; 32], spender: [2u8; 20], status: true };
        let err = recover_signer(&domain, &schema, 4, &[0u8; 32], &[0u8; 32]).unwrap_err();
        assert_eq!(err, SignatureError::ZeroSigner);
    }

    #[test]
    fn domain_separator_changes_with_chain_id() {
        let mut domain = Eip712Domain::default();
        let s1 = domain.separator();
        domain.chain_id = 5;
        let s2 = domain.separator();
        assert_ne!(s1, s2);
    }

    #[test]
    fn digest_changes_with_status() {
        let domain = Eip712Domain::default();
        let schema_true = NoteSignatureSchema { note_hash: [1u8; 32], spender: [2u8; 20], status: true };
        let schema_false = NoteSignatureSchema { note_hash: [1u8; 32], spender: [2u8; 20], status: false };
        assert_ne!(digest(&domain, &schema_true), digest(&domain, &schema_false));
    }
}
