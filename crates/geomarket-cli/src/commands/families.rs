//! Families command implementation

use crate::commands::CommandContext;
use crate::output_types::FamilyRow;
use anyhow::Result;
use geomarket_core::models::ProductCatalog;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let catalog = ProductCatalog::builtin();
    let rows: Vec<FamilyRow> = catalog.families().iter().map(FamilyRow::from).collect();

    ctx.output.table(rows)?;
    if !ctx.output.is_json() {
        ctx.output.info("Only available families can be ordered. See products with 'geomarket products <id>'");
    }
    Ok(())
}
