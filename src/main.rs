use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = keyvault_extract::cli::Cli::parse();
    cli.init_tracing();
    cli.run()
}
