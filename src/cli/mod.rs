//! CLI routing and command dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod decode;
pub mod fetch;
pub mod report;

/// Shared context passed to command handlers that talk to a vault.
pub struct CliContext {
    /// Directory of offline vault snapshots.
    pub store: PathBuf,
}

#[derive(Parser, Debug)]
#[command(
    name = "keyvault-extract",
    version,
    about = "Extract key vault secrets and certificates into cluster secret data"
)]
pub struct Cli {
    /// Directory holding `<vault-name>.toml` snapshots
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "KEYVAULT_EXTRACT_STORE",
        default_value = "."
    )]
    pub store: PathBuf,

    /// Log filter (e.g. "debug", "keyvault_extract=trace"); defaults to RUST_LOG, then "info"
    #[arg(long, global = true, env = "KEYVAULT_EXTRACT_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Install the stderr tracing subscriber for this invocation.
    pub fn init_tracing(&self) {
        let filter = match self.log_level.as_deref() {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(self) -> Result<()> {
        let ctx = CliContext { store: self.store };

        match self.command {
            Commands::Fetch(args) => fetch::run(&ctx, args),
            Commands::Decode(args) => decode::run(args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the object named in a request document from the snapshot store
    Fetch(fetch::FetchArgs),
    /// Normalize a local PEM or PKCS#12 certificate export
    Decode(decode::DecodeArgs),
}
