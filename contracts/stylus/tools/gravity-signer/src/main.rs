use std::path::{Path, PathBuf};

use alloy_primitives::B256;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gravity_bridge_types::{
    batch_digest, gravity_id_from_str, logic_call_digest, valset_checkpoint, LogicCall, TxBatch,
    Valset,
};
use gravity_signer::{
    sign_for_roster,
    types::{canonicalize, key_addresses, read_json, read_keys, SignedTransition},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build Gravity bridge digests and sign them with validator keys.
///
/// Inputs are JSON files; signatures are printed as JSON aligned with the roster, ready to be
/// submitted next to it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Bridge instance identifier (at most 32 bytes).
    #[arg(long, env = "GRAVITY_ID", global = true, default_value = "defaultgravityid")]
    gravity_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the checkpoint of a validator set.
    Checkpoint {
        #[arg(long)]
        valset: PathBuf,
    },
    /// Print a validator set with its members in canonical order.
    Canonicalize {
        #[arg(long)]
        valset: PathBuf,
    },
    /// Print the Ethereum address of every key in a key file.
    Addresses {
        #[arg(long, env = "GRAVITY_SIGNER_KEYS")]
        keys: PathBuf,
    },
    /// Sign a new validator set with the keys of the current set.
    SignValset {
        /// The set being installed.
        #[arg(long)]
        valset: PathBuf,
        /// The currently active set, whose members sign.
        #[arg(long)]
        roster: PathBuf,
        #[arg(long, env = "GRAVITY_SIGNER_KEYS")]
        keys: PathBuf,
    },
    /// Sign a transaction batch.
    SignBatch {
        #[arg(long)]
        batch: PathBuf,
        #[arg(long)]
        roster: PathBuf,
        #[arg(long, env = "GRAVITY_SIGNER_KEYS")]
        keys: PathBuf,
    },
    /// Sign a logic call.
    SignLogicCall {
        #[arg(long)]
        call: PathBuf,
        #[arg(long)]
        roster: PathBuf,
        #[arg(long, env = "GRAVITY_SIGNER_KEYS")]
        keys: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let gravity_id = gravity_id_from_str(&cli.gravity_id)
        .ok_or_else(|| anyhow!("gravity id `{}` is longer than 32 bytes", cli.gravity_id))?;

    match cli.command {
        Command::Checkpoint { valset } => {
            let valset: Valset = read_json(&valset)?;
            warn_if_not_canonical(&valset);
            println!("{}", valset_checkpoint(gravity_id, &valset));
        }
        Command::Canonicalize { valset } => {
            let (valset, reordered) = canonicalize(read_json(&valset)?);
            if reordered {
                info!(members = valset.len(), "validator set reordered");
            }
            println!("{}", serde_json::to_string_pretty(&valset)?);
        }
        Command::Addresses { keys } => {
            for address in key_addresses(&read_keys(&keys)?) {
                println!("{address}");
            }
        }
        Command::SignValset {
            valset,
            roster,
            keys,
        } => {
            let valset: Valset = read_json(&valset)?;
            warn_if_not_canonical(&valset);
            let digest = valset_checkpoint(gravity_id, &valset);
            sign_and_print(digest, &roster, &keys)?;
        }
        Command::SignBatch {
            batch,
            roster,
            keys,
        } => {
            let batch: TxBatch = read_json(&batch)?;
            sign_and_print(batch_digest(gravity_id, &batch), &roster, &keys)?;
        }
        Command::SignLogicCall { call, roster, keys } => {
            let call: LogicCall = read_json(&call)?;
            sign_and_print(logic_call_digest(gravity_id, &call), &roster, &keys)?;
        }
    }
    Ok(())
}

fn warn_if_not_canonical(valset: &Valset) {
    if !valset.is_canonically_ordered() {
        warn!("validator set is not in canonical order; the contract will refuse it");
    }
}

fn sign_and_print(digest: B256, roster: &Path, keys: &Path) -> Result<()> {
    let roster: Valset = read_json(roster)?;
    let keys = read_keys(keys)?;
    let signatures = sign_for_roster(&roster, &keys, digest).context("sign digest")?;
    let signed = SignedTransition::new(digest, signatures);
    info!(
        %digest,
        signers = signed.signers,
        members = roster.len(),
        "signed transition"
    );
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}
