#![forbid(unsafe_code)]

//! Command line host for the DTSP frame engine: encrypts/decrypts
//! hex-encoded buffers against a configured `(seed, udid)` pair.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dtsp_core::{DtspConfig, Engine, Error};

#[derive(Debug, Parser)]
#[command(name = "dtsp", about = "Encrypt and decrypt DTSP frames", version)]
struct Cli {
    /// Path to a TOML file providing `seed`/`udid` (or their `_hex` forms).
    #[arg(short, long, default_value = "dtsp.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encrypt a hex-encoded plaintext and print the resulting frame as hex.
    Encrypt {
        /// Plaintext, hex-encoded.
        plaintext_hex: String,
    },
    /// Decrypt a hex-encoded frame and print the recovered plaintext as hex.
    Decrypt {
        /// Frame, hex-encoded.
        frame_hex: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn load_config(path: &PathBuf) -> Result<DtspConfig> {
    DtspConfig::from_file(path).with_context(|| format!("loading config from {}", path.display()))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli.config)?;
    let mut engine = Engine::init(config.seed, config.udid);

    match cli.command {
        Command::Encrypt { plaintext_hex } => {
            let plaintext = hex::decode(&plaintext_hex).context("plaintext is not valid hex")?;
            let frame = engine.encrypt(&plaintext);
            println!("{}", hex::encode(frame));
            Ok(ExitCode::SUCCESS)
        }
        Command::Decrypt { frame_hex } => {
            let frame = hex::decode(&frame_hex).context("frame is not valid hex")?;
            match engine.decrypt(&frame) {
                Ok(plaintext) => {
                    println!("{}", hex::encode(plaintext));
                    Ok(ExitCode::SUCCESS)
                }
                Err(Error::Full) => {
                    tracing::error!("replay cache exhausted, cannot accept any more frames this slot");
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "frame rejected");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }
}
