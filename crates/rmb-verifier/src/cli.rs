//! CLI command definitions and argument parsing

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rmb_core::{EnvelopeV1, EnvelopeVerifier, MemoryTwinRegistry, TranscriptChallenge};

use crate::config::{CliOverrides, VerifierConfig};
use crate::ExitCode;

/// Verify signed twin envelopes against a twin directory
#[derive(Parser, Debug)]
#[command(name = "rmb-verifier")]
#[command(version, about = "Verify signed twin envelopes against a twin directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (info level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Twin directory file (TOML or JSON)
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Verification timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the signature of an envelope
    Verify(VerifyArgs),
    /// Decode a tagged signature string
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Envelope JSON file
    #[arg(long, short)]
    pub envelope: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex encoded signature, tag byte first
    pub signature: String,
}

impl Cli {
    /// CLI flags as config overrides. `--debug` beats `--verbose`.
    pub fn overrides(&self) -> CliOverrides {
        let log_level = if self.debug {
            Some("debug".to_string())
        } else if self.verbose {
            Some("info".to_string())
        } else {
            None
        };

        CliOverrides {
            registry_path: self.registry.clone(),
            log_level,
            lookup_timeout_secs: self.timeout,
        }
    }

    pub async fn execute_with_config(self, config: VerifierConfig) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Verify(args) => args.execute(&config).await,
            Commands::Decode(args) => Ok(args.execute()),
        }
    }
}

impl VerifyArgs {
    pub async fn execute(&self, config: &VerifierConfig) -> anyhow::Result<ExitCode> {
        let Some(registry_path) = config.registry_path.as_deref() else {
            eprintln!("Error: no twin directory configured (use --registry)");
            return Ok(ExitCode::InvalidInput);
        };

        let envelope = match read_envelope(&self.envelope).await {
            Ok(env) => env,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return Ok(ExitCode::InvalidInput);
            }
        };

        let registry = match MemoryTwinRegistry::from_file(registry_path) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Error: loading twin directory {}: {e}", registry_path.display());
                return Ok(ExitCode::InvalidInput);
            }
        };
        let verifier = EnvelopeVerifier::new(registry, TranscriptChallenge);

        tracing::info!(
            uid = %envelope.uid,
            source = envelope.source.twin,
            twins = verifier.registry().len(),
            "verifying envelope"
        );

        match tokio::time::timeout(config.lookup_timeout(), verifier.verify(&envelope)).await {
            Ok(Ok(())) => {
                println!(
                    "OK: envelope {} from twin {} verified",
                    envelope.uid, envelope.source.twin
                );
                Ok(ExitCode::Success)
            }
            Ok(Err(e)) => {
                println!("FAILED [{}]: {}", e.kind(), e);
                Ok(ExitCode::VerificationFailed)
            }
            Err(_) => {
                println!(
                    "FAILED [timeout]: verification did not finish within {}s",
                    config.lookup_timeout_secs
                );
                Ok(ExitCode::Timeout)
            }
        }
    }
}

impl DecodeArgs {
    pub fn execute(&self) -> ExitCode {
        match rmb_crypto::decode(self.signature.trim()) {
            Ok(sig) => {
                println!("scheme:    {}", sig.scheme);
                println!("signature: {}", hex::encode(&sig.bytes));
                ExitCode::Success
            }
            Err(e) => {
                println!("invalid signature: {e}");
                ExitCode::InvalidInput
            }
        }
    }
}

async fn read_envelope(path: &Path) -> anyhow::Result<EnvelopeV1> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading envelope {}", path.display()))?;
    EnvelopeV1::from_json(&data).with_context(|| format!("parsing envelope {}", path.display()))
}
