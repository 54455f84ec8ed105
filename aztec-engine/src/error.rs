//! The closed error taxonomy consumed by wallets and validators.
//!
//! Every public entry point in this crate either succeeds or fails with
//! exactly one of these kinds — never a generic "invalid input". `code()`
//! returns the stable wire string a caller may match on instead of the
//! Rust variant, since that string is itself part of the protocol surface
//! shared with JS/Solidity callers.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AztecError {
    #[error("KPUBLIC_MALFORMED: kPublic is not a canonical scalar in [0, n)")]
    KPublicMalformed,

    #[error("M_TOO_BIG: m exceeds the number of notes supplied")]
    MTooBig,

    #[error("NOT_ON_CURVE: point does not satisfy y^2 = x^3 + 3")]
    NotOnCurve,

    #[error("POINT_AT_INFINITY: point is the identity element")]
    PointAtInfinity,

    #[error("VIEWING_KEY_MALFORMED: viewing key a is zero or out of range")]
    ViewingKeyMalformed,

    #[error("NOTE_VALUE_TOO_BIG: note value k exceeds K_MAX (2^32 - 1)")]
    NoteValueTooBig,

    #[error("BAD_BLINDING_FACTOR: blinding-factor schema has no solution for these notes")]
    BadBlindingFactor,

    #[error("INCORRECT_NOTE_NUMBER: note array length does not match the proof kind")]
    IncorrectNoteNumber,

    #[error("CHALLENGE_RESPONSE_FAIL: a computed response fell outside [0, n)")]
    ChallengeResponseFail,

    #[error("ENCODING_INVALID_LENGTH: a field exceeded its fixed 32-byte width")]
    EncodingInvalidLength,

    #[error("SCALAR_TOO_BIG: scalar is not reduced modulo its field's order")]
    ScalarTooBig,
}

impl AztecError {
    /// The stable string callers match on, independent of `Display`'s prose.
    pub fn code(&self) -> &'static str {
        match self {
            AztecError::KPublicMalformed => "KPUBLIC_MALFORMED",
            AztecError::MTooBig => "M_TOO_BIG",
            AztecError::NotOnCurve => "NOT_ON_CURVE",
            AztecError::PointAtInfinity => "POINT_AT_INFINITY",
            AztecError::ViewingKeyMalformed => "VIEWING_KEY_MALFORMED",
            AztecError::NoteValueTooBig => "NOTE_VALUE_TOO_BIG",
            AztecError::BadBlindingFactor => "BAD_BLINDING_FACTOR",
            AztecError::IncorrectNoteNumber => "INCORRECT_NOTE_NUMBER",
            AztecError::ChallengeResponseFail => "CHALLENGE_RESPONSE_FAIL",
            AztecError::EncodingInvalidLength => "ENCODING_INVALID_LENGTH",
            AztecError::ScalarTooBig => "SCALAR_TOO_BIG",
        }
    }
}
