//! Products command implementation

use crate::cli::ProductsArgs;
use crate::commands::CommandContext;
use crate::output_types::ProductRow;
use anyhow::Result;
use geomarket_core::models::ProductCatalog;

pub fn execute(args: ProductsArgs, ctx: &CommandContext) -> Result<()> {
    let catalog = ProductCatalog::builtin();
    let family = catalog.family(&args.family)?;

    if ctx.output.is_json() {
        return ctx.output.result(family);
    }

    ctx.output.section(format!("{} ({})", family.name, family.id));
    ctx.output.kv("Description", &family.description);
    ctx.output.kv("Available", if family.available { "yes" } else { "coming soon" });

    for product_type in &family.types {
        ctx.output.section(format!("{} [{}]", product_type.name, product_type.id));
        ctx.output.table(ProductRow::rows(product_type).collect::<Vec<_>>())?;
    }
    Ok(())
}
