//! Orders command implementation

use crate::cli::OrdersArgs;
use crate::commands::CommandContext;
use crate::output_types::OrderRow;
use anyhow::Result;
use geomarket_core::error::MarketError;
use geomarket_core::ports::OrderDesk;

pub async fn execute(args: OrdersArgs, ctx: &CommandContext) -> Result<()> {
    let client = ctx.client();

    let Some(order_id) = args.order_id else {
        let orders = client.list_orders().await?;
        let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
        return ctx.output.table(rows);
    };

    let order = client
        .get_order(&order_id)
        .await?
        .ok_or(MarketError::OrderNotFound { id: order_id })?;

    if ctx.output.is_json() {
        return ctx.output.result(order);
    }

    ctx.output.section(format!("Order {}", order.order_id));
    ctx.output.kv("Status", &order.status);
    ctx.output.kv("Name", &order.schedule.order_name);
    ctx.output.kv("Family", &order.family_id);
    ctx.output.kv("Product type", order.product_type_id.as_deref().unwrap_or("Any available"));
    ctx.output.kv("Tier", order.tier_id.as_deref().unwrap_or("Any available"));
    ctx.output.kv("Priority", order.schedule.priority);
    ctx.output.kv("Scenes", order.selected_scene_ids.join(", "));
    ctx.output.kv("Created", &order.created_at);
    Ok(())
}
