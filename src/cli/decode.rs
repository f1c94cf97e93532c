//! Run the certificate decoder directly on a local export.

use crate::cli::report;
use crate::core::cert_decoder;
use crate::util::fs as out_fs;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

fn parse_encoding(s: &str) -> Result<String, String> {
    match s {
        "pem" | "pkcs12" => Ok(s.to_string()),
        other => Err(format!("invalid encoding '{}', must be one of: pem, pkcs12", other)),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input encoding (pem|pkcs12)
    #[arg(value_parser = parse_encoding)]
    pub encoding: String,

    /// File holding the export (PEM text, or base64 PKCS#12)
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Secret name used in the manifest (default: input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Write a secret manifest here instead of printing a summary
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Summary format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub fn run(args: DecodeArgs) -> Result<()> {
    report::validate_format(&args.format)?;

    let raw = out_fs::read_secret_file(&args.input)?;
    let material = if args.encoding == "pkcs12" {
        cert_decoder::decode_pkcs12(&raw)
            .with_context(|| format!("decode {}", args.input.display()))?
    } else {
        cert_decoder::decode_pem(&raw)
    };

    let name = match args.name {
        Some(name) => name,
        None => args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("certificate")
            .to_string(),
    };
    report::emit(&name, &material, true, args.output.as_deref(), &args.format)
}
