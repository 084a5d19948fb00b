//! Figures shown on the review step.

use crate::draft::OrderDraft;
use crate::selection::SceneSelection;

/// Area billed per scene, in km²
pub const BILLED_KM2_PER_SCENE: f64 = 100.0;

/// Tier price × selected scenes × billed area; `None` without a tier
pub fn estimated_cost(draft: &OrderDraft) -> Option<f64> {
    let tier = draft.tier()?;
    Some(tier.price_per_sq_km * draft.selected_scenes().len() as f64 * BILLED_KM2_PER_SCENE)
}

/// Delivery format implied by the collections of the selected scenes
pub fn suggested_data_format(selection: &SceneSelection) -> &'static str {
    if selection.is_empty() {
        return "N/A";
    }
    let collections = selection.collections();
    let has_sar = collections.iter().any(|c| c.contains("sentinel-1"));
    let has_optical = collections.iter().any(|c| c.contains("sentinel-2") || c.contains("landsat"));

    match (has_sar, has_optical) {
        (true, true) => "GeoTIFF (mixed formats)",
        (true, false) => "GeoTIFF",
        _ => "Cloud Optimized GeoTIFF (COG)",
    }
}
