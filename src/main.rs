use anyhow::{Context, Result};
use clap::Parser;

use forecast2github::cli::Cli;
use forecast2github::cli::handlers::{CommandContext, MigrateParams, handle_migrate};
use forecast2github::config::MigrateConfig;
use forecast2github::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let config = MigrateConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let ctx = CommandContext::new(config);

    let params = MigrateParams::from_cli(&cli, &ctx);
    handle_migrate(&ctx, params)?;
    Ok(())
}
