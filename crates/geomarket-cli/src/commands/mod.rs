//! Command implementations

mod collections;
mod config;
mod draft;
mod families;
mod order;
mod orders;
mod products;
mod search;
mod submit;

use crate::cli::{Cli, Commands};
use crate::config_loader::{find_workspace_root, load_config};
use crate::output::OutputWriter;
use crate::storage::DraftFile;
use anyhow::Result;
use geomarket_catalog::MarketplaceClient;
use geomarket_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::PathBuf;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub output: OutputWriter,
    pub config: LayeredConfig,
    pub workspace_root: PathBuf,
    pub dry_run: bool,
}

impl CommandContext {
    pub fn client(&self) -> MarketplaceClient {
        MarketplaceClient::new(self.config.api_url.value.clone())
    }

    pub fn draft_file(&self) -> DraftFile {
        DraftFile::in_workspace(&self.workspace_root)
    }

    /// Spinners are drawn for humans only
    pub fn show_progress(&self) -> bool {
        !self.output.is_json()
    }
}

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let workspace_root = find_workspace_root()?;
    let overrides = CliConfigOverrides {
        api_url: cli.api_url,
        page_size: cli.page_size,
        cloud_cover_max: None,
    };
    let ctx = CommandContext {
        output: OutputWriter::new(cli.json),
        config: load_config(&workspace_root, overrides)?,
        workspace_root,
        dry_run: cli.dry_run,
    };
    tracing::debug!(
        workspace = %ctx.workspace_root.display(),
        api_url = %ctx.config.api_url.value,
        "Loaded configuration"
    );

    match cli.command {
        Commands::Families => families::execute(&ctx),
        Commands::Products(args) => products::execute(args, &ctx),
        Commands::Collections => collections::execute(&ctx).await,
        Commands::Search(args) => search::execute(args, &ctx).await,
        Commands::Order(args) => order::execute(args, &ctx).await,
        Commands::Draft(args) => draft::execute(args, &ctx),
        Commands::Submit => submit::execute(&ctx).await,
        Commands::Orders(args) => orders::execute(args, &ctx).await,
        Commands::Config => config::execute(&ctx),
    }
}
