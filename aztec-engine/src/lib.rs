//! BN128 sigma-protocol proof-construction engine for confidential notes.
//!
//! Builds non-interactive zero-knowledge proofs that a set of Pedersen-
//! committed notes satisfy a value-balance relation (join-split, bilateral
//! swap, dividend, private range, mint, burn), without revealing any
//! committed value. Every public entry point is synchronous, takes an
//! injected CSPRNG, and either succeeds or fails with exactly one
//! [`error::AztecError`] variant.
//!
//! This crate produces the byte-exact input an on-chain validator expects;
//! it does not itself validate proofs, generate a trusted setup, or manage
//! wallet keys.

pub mod abi;
pub mod crs;
pub mod curve;
pub mod eip712;
pub mod error;
pub mod field;
pub mod note;
pub mod proofs;
pub mod schema;
pub mod transcript;

pub use crs::Crs;
pub use error::AztecError;
pub use note::Note;
pub use proofs::{ProofOutput, ProofRecord};
