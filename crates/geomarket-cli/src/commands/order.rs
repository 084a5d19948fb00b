//! Interactive order wizard

use crate::cli::OrderArgs;
use crate::commands::draft::{show_draft, stepper_line};
use crate::commands::submit::show_preview;
use crate::commands::CommandContext;
use crate::interactive::{self, ProductChoice};
use crate::output_types::SceneRow;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::{bail, Result};
use dialoguer::Select;
use geomarket_catalog::MarketplaceClient;
use geomarket_core::error::MarketError;
use geomarket_core::models::{ProductCatalog, ResultOrder};
use geomarket_wizard::review::suggested_data_format;
use geomarket_wizard::{
    build_order_request, OrderAction, OrderDraft, OrderStore, OrderSubmission, SearchSession,
    WizardStep,
};

/// Where the wizard goes after the review screen
enum ReviewChoice {
    Submit,
    Edit(WizardStep),
    SaveAndExit,
}

pub async fn execute(args: OrderArgs, ctx: &CommandContext) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The order wizard is interactive; use 'search', 'draft' and 'submit' for JSON output");
    }

    let draft_file = ctx.draft_file();
    let draft = if args.resume {
        draft_file.load()?
    } else {
        if draft_file.path().exists()
            && !interactive::confirm("A saved draft exists. Discard it and start over?", false)?
        {
            ctx.output.info("Keeping the saved draft; continue it with 'geomarket order --resume'");
            return Ok(());
        }
        OrderDraft::default()
    };

    let mut store = OrderStore::with_draft(ProductCatalog::builtin(), draft);
    let mut session = SearchSession::new(ctx.client());
    let mut revisit: Option<WizardStep> = None;

    loop {
        let step = revisit.take().filter(|s| store.can_navigate_to(*s)).unwrap_or(store.step());
        println!();
        println!("{}", stepper_line(step));
        println!();

        match step {
            WizardStep::SelectFamily => {
                let family_id = interactive::select_family(store.catalog())?;
                store.select_family(&family_id)?;
            }
            WizardStep::SelectProducts => choose_products(&mut store)?,
            WizardStep::BrowseImagery => {
                if !browse(&mut store, &mut session, ctx).await? {
                    draft_file.save(store.draft())?;
                    ctx.output.info("Draft saved; continue it with 'geomarket order --resume'");
                    return Ok(());
                }
            }
            WizardStep::Configure => configure(&mut store)?,
            WizardStep::Schedule => {
                configure(&mut store)?;
                schedule(&mut store)?;
            }
            WizardStep::Review => match review_choice(ctx, store.draft())? {
                ReviewChoice::Submit => {
                    if ctx.dry_run {
                        return show_preview(ctx, build_order_request(store.draft())?);
                    }
                    if submit(ctx, store.draft()).await? {
                        draft_file.clear()?;
                    } else {
                        draft_file.save(store.draft())?;
                    }
                    return Ok(());
                }
                ReviewChoice::Edit(target) => revisit = Some(target),
                ReviewChoice::SaveAndExit => {
                    draft_file.save(store.draft())?;
                    ctx.output.info("Draft saved; submit it later with 'geomarket submit'");
                    return Ok(());
                }
            },
        }

        draft_file.save(store.draft())?;
    }
}

fn choose_products(store: &mut OrderStore) -> Result<()> {
    let mode = interactive::select_order_mode()?;
    store.dispatch(OrderAction::SetOrderMode(mode))?;

    let family = store
        .draft()
        .family()
        .cloned()
        .ok_or(MarketError::SelectionMissing { what: "product family" })?;
    match interactive::select_products(&family)? {
        ProductChoice::AnyAvailable => {
            store.dispatch(OrderAction::SetAnyAvailable(true))?;
        }
        ProductChoice::Specific { type_id, tier_id } => {
            store.dispatch(OrderAction::SelectProductType(type_id))?;
            store.dispatch(OrderAction::SelectTier(tier_id))?;
        }
    }
    Ok(())
}

/// Search, page and pick scenes. Returns false when the user stops without a selection.
async fn browse(
    store: &mut OrderStore,
    session: &mut SearchSession<MarketplaceClient>,
    ctx: &CommandContext,
) -> Result<bool> {
    loop {
        if store.draft().area_of_interest().is_none()
            || interactive::confirm("Change the area of interest?", false)?
        {
            let area = interactive::prompt_area_of_interest()?;
            store.dispatch(OrderAction::SetAreaOfInterest(Some(area)))?;
        }

        let mut params = interactive::prompt_search_params(store.draft().search_params())?;
        params.limit = Some(ctx.config.page_size.value);
        store.dispatch(OrderAction::UpdateSearchParams(params))?;

        let mut load_more = false;
        while search_with_retry(store, session, load_more).await? {
            let toggled = {
                let visible = store.draft().sorted_results(ResultOrder::Newest);
                if visible.is_empty() {
                    ctx.output.warning("No scenes match; try a wider area or other dates");
                    Vec::new()
                } else {
                    let rows: Vec<SceneRow> = visible.iter().copied().map(SceneRow::from).collect();
                    ctx.output.table(rows)?;
                    interactive::select_scenes(&visible, store.draft().selected_scenes())?
                }
            };
            for scene in toggled {
                store.dispatch(OrderAction::ToggleScene(scene))?;
            }

            let draft = store.draft();
            ctx.output.info(format!(
                "{} of {} scenes loaded, {} selected",
                draft.results().len(),
                draft.total_matched(),
                draft.selected_scenes().len()
            ));
            if !draft.has_more_results() || !interactive::confirm("Load more scenes?", false)? {
                break;
            }
            load_more = true;
        }

        if !store.draft().selected_scenes().is_empty() {
            return Ok(true);
        }
        if !interactive::confirm("No scenes selected. Search again?", true)? {
            return Ok(false);
        }
    }
}

/// Run one catalog request, offering to retry it when the catalog is unreachable.
/// Returns false when the user gives up.
async fn search_with_retry(
    store: &mut OrderStore,
    session: &mut SearchSession<MarketplaceClient>,
    load_more: bool,
) -> Result<bool> {
    let mut spinner = create_spinner("Searching catalog...", true);
    let mut outcome = if load_more {
        session.load_more(store).await
    } else {
        session.search(store).await
    };

    loop {
        match outcome {
            Ok(received) => {
                finish_success(&spinner, &format!("Received {} scenes", received));
                return Ok(true);
            }
            Err(e) if e.is_retryable() => {
                finish_error(&spinner, &e.to_string());
                if !interactive::confirm("Retry the same request?", true)? {
                    return Ok(false);
                }
                spinner = create_spinner("Retrying...", true);
                outcome = session.retry(store).await;
            }
            Err(e) => {
                finish_error(&spinner, "Search failed");
                return Err(e.into());
            }
        }
    }
}

fn configure(store: &mut OrderStore) -> Result<()> {
    let suggested = suggested_data_format(store.draft().selected_scenes());
    let patch = interactive::prompt_configuration(store.draft().configuration(), suggested)?;
    store.dispatch(OrderAction::UpdateConfiguration(patch))?;
    Ok(())
}

fn schedule(store: &mut OrderStore) -> Result<()> {
    let mode = store
        .draft()
        .order_mode()
        .ok_or(MarketError::SelectionMissing { what: "order mode" })?;
    let patch = interactive::prompt_schedule(store.draft().schedule(), mode)?;
    store.dispatch(OrderAction::UpdateSchedule(patch))?;
    Ok(())
}

fn review_choice(ctx: &CommandContext, draft: &OrderDraft) -> Result<ReviewChoice> {
    show_draft(&ctx.output, draft);
    println!();

    let options = [
        "Submit order",
        "Edit products",
        "Edit imagery selection",
        "Edit configuration",
        "Edit schedule",
        "Save and exit",
    ];
    let idx = Select::new().with_prompt("Next").items(&options).default(0).interact()?;
    Ok(match idx {
        0 => ReviewChoice::Submit,
        1 => ReviewChoice::Edit(WizardStep::SelectProducts),
        2 => ReviewChoice::Edit(WizardStep::BrowseImagery),
        3 => ReviewChoice::Edit(WizardStep::Configure),
        4 => ReviewChoice::Edit(WizardStep::Schedule),
        _ => ReviewChoice::SaveAndExit,
    })
}

/// Returns true once the order desk has accepted the order
async fn submit(ctx: &CommandContext, draft: &OrderDraft) -> Result<bool> {
    let mut submission = OrderSubmission::new(ctx.client());
    let mut spinner = create_spinner("Submitting order...", true);
    let mut outcome = submission.submit(draft).await;

    loop {
        match outcome {
            Ok(order) => {
                finish_success(&spinner, &format!("Order {} submitted", order.order_id));
                ctx.output.kv("Status", &order.status);
                ctx.output.kv("Created", &order.created_at);
                return Ok(true);
            }
            Err(e) if e.is_retryable() => {
                finish_error(&spinner, &e.to_string());
                if !interactive::confirm("Retry submission?", true)? {
                    ctx.output.info("Draft saved; submit it later with 'geomarket submit'");
                    return Ok(false);
                }
                spinner = create_spinner("Retrying...", true);
                outcome = submission.retry().await;
            }
            Err(e) => {
                finish_error(&spinner, "Submission failed");
                return Err(e.into());
            }
        }
    }
}
