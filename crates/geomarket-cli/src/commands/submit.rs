//! Submit command implementation

use crate::commands::CommandContext;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::output_types::{SubmitOutput, SubmitPreview};
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use geomarket_core::models::OrderRequest;
use geomarket_wizard::{build_order_request, OrderSubmission};

pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let draft_file = ctx.draft_file();
    let draft = draft_file.load()?;
    let request = build_order_request(&draft)?;
    if ctx.dry_run {
        return show_preview(ctx, request);
    }

    let spinner = create_spinner("Submitting order...", ctx.show_progress());
    let mut submission = OrderSubmission::new(ctx.client());
    let order = match submission.submit(&draft).await {
        Ok(order) => {
            finish_success(&spinner, &format!("Order {} submitted", order.order_id));
            order
        }
        Err(e) => {
            finish_error(&spinner, "Submission failed; the draft was kept");
            return Err(e.into());
        }
    };

    draft_file.clear()?;

    if ctx.output.is_json() {
        return ctx.output.result(SubmitOutput { order });
    }
    ctx.output.kv("Order", &order.order_id);
    ctx.output.kv("Status", &order.status);
    ctx.output.kv("Created", &order.created_at);
    ctx.output.success("Draft cleared; start a new order with 'geomarket order'");
    Ok(())
}

/// Print the request that would be sent, without sending it
pub(crate) fn show_preview(ctx: &CommandContext, request: OrderRequest) -> Result<()> {
    let endpoint = format!("{}/orders", ctx.client().base_url());
    let actions = vec![
        PlannedAction::new(ActionType::SendRequest, format!("POST {}", endpoint))
            .with_detail(format!("Family: {}", request.family_id))
            .with_detail(format!("Scenes: {}", request.selected_scene_ids.len())),
        PlannedAction::new(ActionType::ResetDraft, "Discard the saved draft")
            .with_detail(format!("Path: {}", ctx.draft_file().path().display())),
    ];
    display_planned_actions(&ctx.output, &actions, &SubmitPreview { endpoint, request })
}
