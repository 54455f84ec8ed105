use std::path::PathBuf;

use anyhow::{Context, Result};
use aztec_engine::abi::{encode, EncodedProofInputs, OutputNoteMetadata};
use aztec_engine::field::GroupScalar;
use aztec_engine::note::Note;
use aztec_engine::proofs::{bilateral_swap, burn, dividend, join_split, mint, private_range};
use aztec_engine::Crs;
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use tracing::info;

/// aztec-cli: build AZTEC-style confidential proofs for manual exercising
/// and fixture generation.
#[derive(Parser)]
#[command(name = "aztec-cli")]
#[command(about = "Construct AZTEC-style confidential proofs")]
struct Cli {
    /// Path to the 192-byte CRS blob. Falls back to AZTEC_CRS_PATH, then
    /// "crs.bin".
    #[arg(long)]
    crs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fixed, non-secret CRS blob for local testing. Not a trusted
    /// setup — only for exercising the CLI against fixtures.
    InitCrs {
        #[arg(long, default_value = "crs.bin")]
        out: String,
    },
    /// Join-split: balance m input notes against the remaining outputs.
    JoinSplit {
        #[arg(long, value_delimiter = ',')]
        k_in: Vec<u64>,
        #[arg(long, value_delimiter = ',')]
        k_out: Vec<u64>,
        #[arg(long, default_value_t = 0)]
        k_public: u64,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
    /// Bilateral swap: two input notes swapped against two output notes.
    BilateralSwap {
        #[arg(long, value_delimiter = ',')]
        notes: Vec<u64>,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
    /// Dividend: za*k_target = zb*k_principal + k_residual.
    Dividend {
        #[arg(long)]
        principal: u64,
        #[arg(long)]
        residual: u64,
        #[arg(long)]
        target: u64,
        #[arg(long)]
        za: u64,
        #[arg(long)]
        zb: u64,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
    /// Private range: prove original >= comparison.
    PrivateRange {
        #[arg(long)]
        original: u64,
        #[arg(long)]
        comparison: u64,
        #[arg(long)]
        utility: u64,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
    /// Mint: current total + new total + freshly minted notes.
    Mint {
        #[arg(long)]
        current_total: u64,
        #[arg(long)]
        new_total: u64,
        #[arg(long, value_delimiter = ',')]
        minted: Vec<u64>,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
    /// Burn: current total + new total + notes being burned.
    Burn {
        #[arg(long)]
        current_total: u64,
        #[arg(long)]
        new_total: u64,
        #[arg(long, value_delimiter = ',')]
        burned: Vec<u64>,
        #[arg(long, default_value = "../proof.bin")]
        out: String,
    },
}

fn load_crs(path: &Option<PathBuf>) -> Result<Crs> {
    let resolved = path
        .clone()
        .or_else(|| std::env::var("AZTEC_CRS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("crs.bin"));
    info!(path = %resolved.display(), "loading CRS");
    let bytes = std::fs::read(&resolved)
        .with_context(|| format!("reading CRS blob at {}", resolved.display()))?;
    Crs::load(&bytes).map_err(|e| anyhow::anyhow!("invalid CRS blob: {e}"))
}

fn make_note(crs: &Crs, k: u64, owner: [u8; 20]) -> Result<Note> {
    let a = GroupScalar::from_u64(k + 1);
    Note::from_viewing_key(crs, k, a, owner, &mut OsRng)
        .map_err(|e| anyhow::anyhow!("constructing note with value {k}: {e}"))
}

fn write_proof(out_path: &str, encoded: &[u8]) -> Result<()> {
    std::fs::write(out_path, encoded).with_context(|| format!("writing proof blob to {out_path}"))?;
    println!("proof written to {out_path} ({} bytes)", encoded.len());
    println!("0x{}", hex::encode(encoded));
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Commands::InitCrs { out } = &cli.command {
        let bytes = Crs::insecure_test_crs().to_bytes();
        std::fs::write(out, bytes).with_context(|| format!("writing CRS blob to {out}"))?;
        println!("CRS written to {out}");
        return Ok(());
    }

    let crs = load_crs(&cli.crs)?;
    let sender = [0u8; 20];
    let owner = [0u8; 20];

    match &cli.command {
        Commands::InitCrs { .. } => unreachable!(),
        Commands::JoinSplit { k_in, k_out, k_public, out } => {
            let mut notes = Vec::new();
            for &k in k_in {
                notes.push(make_note(&crs, k, owner)?);
            }
            for &k in k_out {
                notes.push(make_note(&crs, k, owner)?);
            }
            let m = k_in.len();
            let proof = join_split::prove(
                &crs,
                &notes,
                m,
                GroupScalar::from_u64(*k_public),
                sender,
                owner,
                &mut OsRng,
            )
            .map_err(|e| anyhow::anyhow!("join-split proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: Some(m as u64),
                public_owner: owner,
                k_public: Some(GroupScalar::from_u64(*k_public).to_bytes_be()),
                input_owners: vec![owner; k_in.len()],
                output_owners: vec![owner; k_out.len()],
                output_notes: notes[m..]
                    .iter()
                    .map(|n| OutputNoteMetadata { note_hash: n.note_hash(), encrypted_ephemeral_key: vec![] })
                    .collect(),
            });
            write_proof(out, &encoded)?;
        }
        Commands::BilateralSwap { notes: values, out } => {
            if values.len() != 4 {
                anyhow::bail!("bilateral-swap requires exactly 4 note values");
            }
            let note_vec: Vec<Note> =
                values.iter().map(|&k| make_note(&crs, k, owner)).collect::<Result<_>>()?;
            let notes: [Note; 4] = note_vec.try_into().map_err(|_| anyhow::anyhow!("expected 4 notes"))?;
            let proof = bilateral_swap::prove(&crs, &notes, sender, &mut OsRng)
                .map_err(|e| anyhow::anyhow!("bilateral-swap proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: None,
                public_owner: owner,
                k_public: None,
                input_owners: vec![owner; 2],
                output_owners: vec![owner; 2],
                output_notes: vec![],
            });
            write_proof(out, &encoded)?;
        }
        Commands::Dividend { principal, residual, target, za, zb, out } => {
            let notes = [
                make_note(&crs, *principal, owner)?,
                make_note(&crs, *residual, owner)?,
                make_note(&crs, *target, owner)?,
            ];
            let proof = dividend::prove(&crs, &notes, *za, *zb, sender, &mut OsRng)
                .map_err(|e| anyhow::anyhow!("dividend proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: None,
                public_owner: owner,
                k_public: None,
                input_owners: vec![owner],
                output_owners: vec![owner; 2],
                output_notes: vec![],
            });
            write_proof(out, &encoded)?;
        }
        Commands::PrivateRange { original, comparison, utility, out } => {
            let notes = [
                make_note(&crs, *original, owner)?,
                make_note(&crs, *comparison, owner)?,
                make_note(&crs, *utility, owner)?,
            ];
            let proof = private_range::prove(&crs, &notes, sender, &mut OsRng)
                .map_err(|e| anyhow::anyhow!("private-range proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: None,
                public_owner: owner,
                k_public: None,
                input_owners: vec![owner],
                output_owners: vec![owner; 2],
                output_notes: vec![],
            });
            write_proof(out, &encoded)?;
        }
        Commands::Mint { current_total, new_total, minted, out } => {
            let current = make_note(&crs, *current_total, owner)?;
            let new_total_note = make_note(&crs, *new_total, owner)?;
            let minted_notes: Vec<Note> =
                minted.iter().map(|&k| make_note(&crs, k, owner)).collect::<Result<_>>()?;
            let proof = mint::prove(&crs, &current, &new_total_note, &minted_notes, sender, &mut OsRng)
                .map_err(|e| anyhow::anyhow!("mint proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: Some(1),
                public_owner: owner,
                k_public: Some(GroupScalar::reduce_from_bytes(&new_total_note.note_hash()).to_bytes_be()),
                input_owners: vec![owner],
                output_owners: vec![owner; 1 + minted.len()],
                output_notes: vec![],
            });
            write_proof(out, &encoded)?;
        }
        Commands::Burn { current_total, new_total, burned, out } => {
            let current = make_note(&crs, *current_total, owner)?;
            let new_total_note = make_note(&crs, *new_total, owner)?;
            let burned_notes: Vec<Note> =
                burned.iter().map(|&k| make_note(&crs, k, owner)).collect::<Result<_>>()?;
            let proof = burn::prove(&crs, &current, &new_total_note, &burned_notes, sender, &mut OsRng)
                .map_err(|e| anyhow::anyhow!("burn proof failed: {e}"))?;
            let encoded = encode(&EncodedProofInputs {
                proof: &proof,
                m: Some(1),
                public_owner: owner,
                k_public: Some(GroupScalar::reduce_from_bytes(&new_total_note.note_hash()).to_bytes_be()),
                input_owners: vec![owner],
                output_owners: vec![owner; 1 + burned.len()],
                output_notes: vec![],
            });
            write_proof(out, &encoded)?;
        }
    }

    Ok(())
}
