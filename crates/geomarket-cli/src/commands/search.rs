//! Search command implementation

use crate::cli::SearchArgs;
use crate::commands::CommandContext;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::output_types::{SceneRow, SearchOutput};
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::{Context, Result};
use geomarket_catalog::MarketplaceClient;
use geomarket_core::error::MarketError;
use geomarket_core::models::{LatLng, ProductCatalog, ResultOrder};
use geomarket_geo::AreaOfInterest;
use geomarket_wizard::{OrderAction, OrderStore, SearchParamsPatch, SearchSession};
use std::path::Path;

pub async fn execute(args: SearchArgs, ctx: &CommandContext) -> Result<()> {
    let area = match (&args.circle, &args.polygon) {
        (Some(circle), _) => Some(parse_circle(circle)?),
        (None, Some(path)) => Some(read_polygon(path)?),
        (None, None) => None,
    };

    let mut store = OrderStore::new(ProductCatalog::builtin());
    store.dispatch(OrderAction::SetAreaOfInterest(area))?;
    store.dispatch(OrderAction::UpdateSearchParams(SearchParamsPatch {
        start_date: Some(args.start),
        end_date: Some(args.end),
        collections: Some(args.collections),
        cloud_cover_max: Some(args.cloud_cover.unwrap_or(ctx.config.cloud_cover_max.value)),
        limit: Some(ctx.config.page_size.value),
    }))?;

    if ctx.dry_run {
        let request = SearchSession::<MarketplaceClient>::initial_request(store.draft());
        let action = PlannedAction::new(
            ActionType::SendRequest,
            format!("POST {}/catalog/search", ctx.client().base_url()),
        )
        .with_detail(format!("Pages: up to {}", args.pages))
        .with_detail(format!("Page size: {}", request.limit));
        return display_planned_actions(&ctx.output, &[action], &request);
    }

    let order = ResultOrder::from(args.sort);
    let mut session = SearchSession::new(ctx.client());
    let spinner = create_spinner("Searching catalog...", ctx.show_progress());

    let mut outcome = session.search(&mut store).await;
    let mut pages = 1;
    while outcome.is_ok() && pages < args.pages && store.draft().has_more_results() {
        spinner.set_message(format!("Loading page {}...", pages + 1));
        outcome = session.load_more(&mut store).await;
        pages += 1;
    }

    if let Err(e) = outcome {
        finish_error(&spinner, "Search failed");
        return Err(e.into());
    }

    let draft = store.draft();
    finish_success(
        &spinner,
        &format!("{} of {} matching scenes loaded", draft.results().len(), draft.total_matched()),
    );

    let visible = draft.sorted_results(order);
    let hidden = draft.results().len() - visible.len();
    let rows: Vec<SceneRow> = visible.into_iter().map(SceneRow::from).collect();

    if ctx.output.is_json() {
        return ctx.output.result(SearchOutput {
            area: draft.area_of_interest().map(|a| a.describe()),
            bbox: draft.area_of_interest().map(|a| a.bbox().to_array()),
            datetime: draft.search_params().datetime(),
            number_matched: draft.total_matched(),
            loaded: draft.results().len(),
            hidden_by_cloud_filter: hidden,
            scenes: rows,
        });
    }

    if let Some(area) = draft.area_of_interest() {
        ctx.output.kv("Area", area.describe());
        ctx.output.kv("Bounding box", format!("{:?}", area.bbox().to_array()));
    }
    if let Some(datetime) = draft.search_params().datetime() {
        ctx.output.kv("Acquired", datetime);
    }
    ctx.output.table(rows)?;
    if hidden > 0 {
        ctx.output.info(format!(
            "{} scenes hidden above {}% cloud cover",
            hidden,
            draft.search_params().cloud_cover_max
        ));
    }
    if draft.has_more_results() {
        ctx.output.info("More scenes match; use --pages to load further pages");
    }
    Ok(())
}

/// Parse `LAT,LNG,RADIUS_KM`
pub(crate) fn parse_circle(text: &str) -> Result<AreaOfInterest> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [lat, lng, radius] = parts.as_slice() else {
        return Err(MarketError::InvalidGeometry {
            reason: format!("Expected LAT,LNG,RADIUS_KM, got '{}'", text),
        }
        .into());
    };

    let number = |value: &str| {
        value.parse::<f64>().map_err(|_| MarketError::InvalidGeometry {
            reason: format!("'{}' is not a number", value),
        })
    };
    let area = AreaOfInterest::circle(LatLng::new(number(*lat)?, number(*lng)?), number(*radius)?)?;
    Ok(area)
}

/// Read a polygon area from a GeoJSON file
pub(crate) fn read_polygon(path: &Path) -> Result<AreaOfInterest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(AreaOfInterest::from_geojson_str(&text)?)
}
