//! Config command implementation

use crate::commands::CommandContext;
use crate::config_loader::WORKSPACE_DIR;
use crate::output_types::ConfigRow;
use anyhow::Result;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let rows = ConfigRow::rows(&ctx.config);
    if ctx.output.is_json() {
        return ctx.output.result(rows);
    }

    ctx.output.section("Configuration");
    ctx.output.kv("Config file", ctx.workspace_root.join(WORKSPACE_DIR).join("config.toml").display());
    ctx.output.table(rows)?;
    ctx.output.info("Precedence: CLI flags > GEOMARKET_* environment > config file > defaults");
    Ok(())
}
