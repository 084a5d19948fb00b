//! Collections command implementation

use crate::commands::CommandContext;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use geomarket_core::ports::CatalogProvider;

pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let client = ctx.client();
    let spinner = create_spinner("Fetching collections...", ctx.show_progress());

    let collections = match client.collections().await {
        Ok(collections) => {
            finish_success(&spinner, &format!("{} collections", collections.len()));
            collections
        }
        Err(e) => {
            finish_error(&spinner, "Could not list collections");
            return Err(e.into());
        }
    };

    if ctx.output.is_json() {
        return ctx.output.result(collections);
    }
    ctx.output.section("Collections");
    for id in &collections {
        println!("  • {}", id);
    }
    Ok(())
}
