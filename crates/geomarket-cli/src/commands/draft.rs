//! Draft command implementation

use crate::cli::DraftArgs;
use crate::commands::CommandContext;
use crate::output::OutputWriter;
use crate::output_types::DraftStatusOutput;
use anyhow::Result;
use console::style;
use geomarket_wizard::{OrderDraft, WizardStep};

pub fn execute(args: DraftArgs, ctx: &CommandContext) -> Result<()> {
    let draft_file = ctx.draft_file();

    if args.reset {
        if ctx.dry_run {
            ctx.output.info(format!("Would remove {}", draft_file.path().display()));
            return Ok(());
        }
        draft_file.clear()?;
        ctx.output.success("Draft discarded");
        return Ok(());
    }

    let draft = draft_file.load()?;
    if ctx.output.is_json() {
        return ctx.output.result(DraftStatusOutput::from(&draft));
    }
    show_draft(&ctx.output, &draft);
    if draft.step() < WizardStep::Review {
        ctx.output.info("Continue with 'geomarket order --resume'");
    } else {
        ctx.output.info("Ready to submit with 'geomarket submit'");
    }
    Ok(())
}

/// `✓ 1. Template  ✓ 2. Products  ▶ 3. Browse  · 4. Configure ...`
pub(crate) fn stepper_line(current: WizardStep) -> String {
    WizardStep::ALL
        .iter()
        .map(|step| {
            if *step < current {
                format!("{} {}", style("✓").green(), style(step).dim())
            } else if *step == current {
                format!("{} {}", style("▶").cyan().bold(), style(step).bold())
            } else {
                format!("{} {}", style("·").dim(), style(step).dim())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Human summary of a draft, as shown on the review step
pub(crate) fn show_draft(output: &OutputWriter, draft: &OrderDraft) {
    let status = DraftStatusOutput::from(draft);

    output.section("Order Draft");
    println!("{}", stepper_line(draft.step()));
    println!();

    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    output.kv("Family", or_dash(&status.family));
    output.kv("Mode", or_dash(&status.order_mode));
    if status.any_available {
        output.kv("Products", "Any available");
    } else {
        output.kv("Product type", or_dash(&status.product_type));
        output.kv("Tier", or_dash(&status.tier));
    }
    output.kv("Area of interest", or_dash(&status.area_of_interest));
    output.kv("Results", format!("{} of {} loaded", status.loaded_results, status.total_matched));
    output.kv("Selected scenes", status.selected_scenes.len());
    if !status.order_name.is_empty() {
        output.kv("Order name", &status.order_name);
    }
    let schedule = draft.schedule();
    if let (Some(start), Some(end)) = (schedule.start_date, schedule.end_date) {
        output.kv("Collection window", format!("{} to {}", start, end));
    }
    output.kv("Priority", schedule.priority);
    output.kv("Data format", status.data_format);
    if let Some(cost) = status.estimated_cost {
        output.kv("Estimated cost", format!("${:.2}", cost));
    }
}
