//! `sivtool`: seal and open from the command line.
//!
//! Startup sequence, after argument parsing:
//! 1. Load and validate [`config::Config`] from `SIVTOOL_*` environment variables.
//! 2. Initialise logging (stderr).
//! 3. Run the command against the build's default engine and print JSON to stdout.
//!
//! A boundary failure prints an `ErrorReport` JSON object to stderr; any other
//! failure prints the error chain. Either way the exit status is non-zero.

mod commands;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use aesgcmsiv::{Aead, DefaultEngine};

#[derive(Debug, Parser)]
#[command(name = "sivtool", version, about = "AES-256-GCM-SIV seal/open tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encrypt and authenticate a UTF-8 plaintext. Key comes from `SIVTOOL_KEY`.
    Seal {
        /// Base64 12-byte nonce.
        #[arg(long)]
        nonce: String,
        /// Base64 associated data.
        #[arg(long)]
        aad: Option<String>,
        /// Plaintext, taken verbatim.
        plaintext: String,
    },
    /// Verify and decrypt a base64 ciphertext. Key comes from `SIVTOOL_KEY`.
    Open {
        /// Base64 12-byte nonce.
        #[arg(long)]
        nonce: String,
        /// Base64 associated data.
        #[arg(long)]
        aad: Option<String>,
        /// Base64 16-byte tag.
        #[arg(long)]
        tag: String,
        /// Base64 ciphertext.
        ciphertext: String,
    },
    /// Check round-trip, tamper rejection and validation order.
    SelfTest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match commands::failure_report(&e).map(|r| serde_json::to_string(&r)) {
                Some(Ok(json)) => eprintln!("{json}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().context("sivtool configuration invalid")?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    aesgcmsiv::telemetry::init_telemetry(&aesgcmsiv::config::Config {
        log_level: cfg.log_level.clone(),
        log_format: aesgcmsiv::config::LogFormat::Text,
    })?;

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    let aead = Aead::new(DefaultEngine::default());
    match cli.command {
        Command::Seal {
            nonce,
            aad,
            plaintext,
        } => {
            let key = cfg.key_bytes()?;
            let report = commands::seal(&aead, &key, &nonce, aad.as_deref(), plaintext.as_bytes())?;
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::Open {
            nonce,
            aad,
            tag,
            ciphertext,
        } => {
            let key = cfg.key_bytes()?;
            let report = commands::open(&aead, &key, &nonce, aad.as_deref(), &tag, &ciphertext)?;
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::SelfTest => {
            commands::self_test(&aead)?;
            println!("{}", serde_json::json!({ "status": "ok", "algorithm": common::ALGORITHM }));
        }
    }

    Ok(())
}
