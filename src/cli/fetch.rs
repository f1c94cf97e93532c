use crate::cli::{report, CliContext};
use crate::core::file_vault::FileVaultFactory;
use crate::core::{request, retriever};
use crate::models::VaultObjectType;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Secret request document (TOML)
    #[arg(long, value_name = "PATH")]
    pub request: PathBuf,

    /// Write a secret manifest here instead of printing a summary
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Summary format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub fn run(ctx: &CliContext, args: FetchArgs) -> Result<()> {
    report::validate_format(&args.format)?;

    let request = request::load_request(&args.request)?;
    let factory = FileVaultFactory::new(ctx.store.clone());
    let object = request.object_ref()?;

    info!(vault = %request.vault.name, object = %object, "fetching vault object");
    let material = retriever::retrieve_request(&request, &factory)
        .with_context(|| format!("fetch {} from vault '{}'", object, request.vault.name))?;

    let tls = object.object_type() == VaultObjectType::Certificate;
    report::emit(
        request.output_name(),
        &material,
        tls,
        args.output.as_deref(),
        &args.format,
    )
}
