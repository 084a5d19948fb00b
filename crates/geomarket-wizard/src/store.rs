//! Order state store: actions, the reducer and the owning store.

use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::{OrderMode, ProductCatalog, ProductFamily, Scene, SceneId};
use geomarket_geo::AreaOfInterest;
use tracing::debug;

use crate::draft::{ConfigurationPatch, OrderDraft, SchedulePatch, SearchParamsPatch};
use crate::step::WizardStep;

/// Every change the wizard can make to a draft
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Choose a product family; clears the mode and everything downstream
    SelectFamily(ProductFamily),
    /// Choose historical or future; clears "any available" and everything downstream
    SetOrderMode(OrderMode),
    /// Enabling clears the product type and tier
    SetAnyAvailable(bool),
    /// Choose a product type of the selected family; clears the tier
    SelectProductType(String),
    /// Choose a tier of the selected product type
    SelectTier(String),
    UpdateConfiguration(ConfigurationPatch),
    UpdateSchedule(SchedulePatch),
    SetAreaOfInterest(Option<AreaOfInterest>),
    UpdateSearchParams(SearchParamsPatch),
    /// First page of a new search
    ReplaceResults { scenes: Vec<Scene>, total_matched: usize },
    /// Next page of the current search
    AppendResults { scenes: Vec<Scene>, total_matched: usize },
    ToggleScene(Scene),
    AddScene(Scene),
    RemoveScene(SceneId),
    ClearSelection,
    Reset,
}

impl OrderAction {
    fn name(&self) -> &'static str {
        match self {
            OrderAction::SelectFamily(_) => "select_family",
            OrderAction::SetOrderMode(_) => "set_order_mode",
            OrderAction::SetAnyAvailable(_) => "set_any_available",
            OrderAction::SelectProductType(_) => "select_product_type",
            OrderAction::SelectTier(_) => "select_tier",
            OrderAction::UpdateConfiguration(_) => "update_configuration",
            OrderAction::UpdateSchedule(_) => "update_schedule",
            OrderAction::SetAreaOfInterest(_) => "set_area_of_interest",
            OrderAction::UpdateSearchParams(_) => "update_search_params",
            OrderAction::ReplaceResults { .. } => "replace_results",
            OrderAction::AppendResults { .. } => "append_results",
            OrderAction::ToggleScene(_) => "toggle_scene",
            OrderAction::AddScene(_) => "add_scene",
            OrderAction::RemoveScene(_) => "remove_scene",
            OrderAction::ClearSelection => "clear_selection",
            OrderAction::Reset => "reset",
        }
    }
}

/// Apply an action to a draft, producing the next draft.
///
/// The input draft is never modified, so a rejected action leaves the
/// caller's state exactly as it was.
pub fn reduce(draft: &OrderDraft, action: OrderAction) -> Result<OrderDraft> {
    let mut next = draft.clone();

    match action {
        OrderAction::SelectFamily(family) => {
            if !family.available {
                return Err(MarketError::FamilyUnavailable { id: family.id });
            }
            next.family = Some(family);
            next.order_mode = None;
            next.reset_downstream();
        }
        OrderAction::SetOrderMode(mode) => {
            if next.family.is_none() {
                return Err(MarketError::SelectionMissing { what: "product family" });
            }
            next.order_mode = Some(mode);
            next.any_available = false;
            next.reset_downstream();
        }
        OrderAction::SetAnyAvailable(enabled) => {
            next.any_available = enabled;
            if enabled {
                next.product_type = None;
                next.tier = None;
            }
        }
        OrderAction::SelectProductType(type_id) => {
            let family =
                next.family.as_ref().ok_or(MarketError::SelectionMissing { what: "product family" })?;
            let product_type = family.product_type(&type_id).cloned().ok_or_else(|| {
                MarketError::ProductTypeNotFound { family_id: family.id.clone(), type_id }
            })?;
            next.product_type = Some(product_type);
            next.tier = None;
            next.any_available = false;
        }
        OrderAction::SelectTier(tier_id) => {
            let product_type =
                next.product_type.as_ref().ok_or(MarketError::SelectionMissing { what: "product type" })?;
            let tier = product_type.tier(&tier_id).cloned().ok_or_else(|| {
                MarketError::TierNotFound { type_id: product_type.id.clone(), tier_id }
            })?;
            next.tier = Some(tier);
        }
        OrderAction::UpdateConfiguration(patch) => patch.apply(&mut next.configuration),
        OrderAction::UpdateSchedule(patch) => patch.apply(&mut next.schedule),
        OrderAction::SetAreaOfInterest(aoi) => next.area_of_interest = aoi,
        OrderAction::UpdateSearchParams(patch) => patch.apply(&mut next.search_params),
        OrderAction::ReplaceResults { scenes, total_matched } => {
            next.results = scenes;
            next.total_matched = total_matched;
        }
        OrderAction::AppendResults { scenes, total_matched } => {
            next.results.extend(scenes);
            next.total_matched = total_matched;
        }
        OrderAction::ToggleScene(scene) => {
            next.selected_scenes.toggle(scene);
        }
        OrderAction::AddScene(scene) => {
            next.selected_scenes.insert(scene);
        }
        OrderAction::RemoveScene(scene_id) => {
            next.selected_scenes.remove(&scene_id);
        }
        OrderAction::ClearSelection => next.selected_scenes.clear(),
        OrderAction::Reset => next = OrderDraft::default(),
    }

    Ok(next)
}

/// Single owner of a draft and the product catalog it is validated against
#[derive(Debug, Clone)]
pub struct OrderStore {
    catalog: ProductCatalog,
    draft: OrderDraft,
}

impl OrderStore {
    /// Create a store with an empty draft
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog, draft: OrderDraft::default() }
    }

    /// Resume a previously saved draft
    pub fn with_draft(catalog: ProductCatalog, draft: OrderDraft) -> Self {
        Self { catalog, draft }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.draft.step()
    }

    /// Apply an action; on error the draft is unchanged
    pub fn dispatch(&mut self, action: OrderAction) -> Result<WizardStep> {
        let name = action.name();
        let next = reduce(&self.draft, action)?;
        let from = self.draft.step();
        self.draft = next;
        let to = self.draft.step();
        debug!(action = name, from = from.number(), to = to.number(), "Order draft updated");
        Ok(to)
    }

    /// Look the family up in the catalog and select it
    pub fn select_family(&mut self, family_id: &str) -> Result<WizardStep> {
        let family = self.catalog.family(family_id)?.clone();
        self.dispatch(OrderAction::SelectFamily(family))
    }

    /// A step can be visited once every earlier step is complete
    pub fn can_navigate_to(&self, target: WizardStep) -> bool {
        target <= self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geomarket_core::models::LatLng;

    fn store() -> OrderStore {
        OrderStore::new(ProductCatalog::builtin())
    }

    fn browse_ready(store: &mut OrderStore) {
        store.select_family("imagery").unwrap();
        store.dispatch(OrderAction::SetOrderMode(OrderMode::Historical)).unwrap();
        store.dispatch(OrderAction::SelectProductType("electro-optical".into())).unwrap();
        store.dispatch(OrderAction::SelectTier("tactical".into())).unwrap();
    }

    #[test]
    fn test_unknown_and_unavailable_families_rejected() {
        let mut store = store();
        assert!(matches!(store.select_family("nope"), Err(MarketError::FamilyNotFound { .. })));
        assert!(matches!(store.select_family("sda"), Err(MarketError::FamilyUnavailable { .. })));
        assert_eq!(store.draft(), &OrderDraft::default());
    }

    #[test]
    fn test_product_choices_advance_to_browse() {
        let mut store = store();
        assert_eq!(store.select_family("imagery").unwrap(), WizardStep::SelectProducts);
        browse_ready(&mut store);
        assert_eq!(store.step(), WizardStep::BrowseImagery);
    }

    #[test]
    fn test_product_type_must_belong_to_family() {
        let mut store = store();
        store.select_family("imagery").unwrap();
        let err = store.dispatch(OrderAction::SelectProductType("flash".into())).unwrap_err();
        assert!(matches!(err, MarketError::ProductTypeNotFound { .. }));
    }

    #[test]
    fn test_tier_requires_product_type() {
        let mut store = store();
        store.select_family("imagery").unwrap();
        let err = store.dispatch(OrderAction::SelectTier("tactical".into())).unwrap_err();
        assert!(matches!(err, MarketError::SelectionMissing { what: "product type" }));
    }

    #[test]
    fn test_new_family_clears_downstream() {
        let mut store = store();
        browse_ready(&mut store);
        let aoi = AreaOfInterest::circle(LatLng::new(1.0, 1.0), 10.0).unwrap();
        store.dispatch(OrderAction::SetAreaOfInterest(Some(aoi))).unwrap();
        store
            .dispatch(OrderAction::ReplaceResults {
                scenes: vec![Scene::new("S1", "sentinel-2-l2a")],
                total_matched: 7,
            })
            .unwrap();
        store.dispatch(OrderAction::ToggleScene(Scene::new("S1", "sentinel-2-l2a"))).unwrap();

        store.select_family("imagery").unwrap();

        let draft = store.draft();
        assert!(draft.order_mode().is_none());
        assert!(draft.product_type().is_none());
        assert!(draft.tier().is_none());
        assert!(draft.area_of_interest().is_none());
        assert!(draft.results().is_empty());
        assert_eq!(draft.total_matched(), 0);
        assert!(draft.selected_scenes().is_empty());
        assert_eq!(store.step(), WizardStep::SelectProducts);
    }

    #[test]
    fn test_order_mode_resets_any_available() {
        let mut store = store();
        store.select_family("imagery").unwrap();
        store.dispatch(OrderAction::SetAnyAvailable(true)).unwrap();
        store.dispatch(OrderAction::SetOrderMode(OrderMode::Future)).unwrap();
        assert!(!store.draft().any_available());
    }

    #[test]
    fn test_any_available_skips_product_choice() {
        let mut store = store();
        browse_ready(&mut store);
        store.dispatch(OrderAction::SetAnyAvailable(true)).unwrap();

        assert!(store.draft().product_type().is_none());
        assert!(store.draft().tier().is_none());
        assert_eq!(store.step(), WizardStep::BrowseImagery);
    }

    #[test]
    fn test_historical_order_needs_only_a_name() {
        let mut store = store();
        browse_ready(&mut store);
        store.dispatch(OrderAction::AddScene(Scene::new("S1", "landsat-c2-l2"))).unwrap();
        assert_eq!(store.step(), WizardStep::Schedule);

        store.dispatch(OrderAction::UpdateSchedule(SchedulePatch::named("Harbor"))).unwrap();
        assert_eq!(store.step(), WizardStep::Review);
    }

    #[test]
    fn test_future_order_needs_dates() {
        let mut store = store();
        store.select_family("imagery").unwrap();
        store.dispatch(OrderAction::SetOrderMode(OrderMode::Future)).unwrap();
        store.dispatch(OrderAction::SetAnyAvailable(true)).unwrap();
        store.dispatch(OrderAction::AddScene(Scene::new("S1", "landsat-c2-l2"))).unwrap();
        store.dispatch(OrderAction::UpdateSchedule(SchedulePatch::named("Harbor"))).unwrap();
        assert_eq!(store.step(), WizardStep::Schedule);

        store
            .dispatch(OrderAction::UpdateSchedule(SchedulePatch {
                start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1)),
                end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31)),
                ..Default::default()
            }))
            .unwrap();
        assert_eq!(store.step(), WizardStep::Review);
    }

    #[test]
    fn test_blank_name_does_not_count() {
        let mut store = store();
        browse_ready(&mut store);
        store.dispatch(OrderAction::AddScene(Scene::new("S1", "landsat-c2-l2"))).unwrap();
        store.dispatch(OrderAction::UpdateSchedule(SchedulePatch::named("   "))).unwrap();
        assert_eq!(store.step(), WizardStep::Schedule);
    }

    #[test]
    fn test_navigation_gating() {
        let mut store = store();
        browse_ready(&mut store);
        assert!(store.can_navigate_to(WizardStep::SelectFamily));
        assert!(store.can_navigate_to(WizardStep::BrowseImagery));
        assert!(!store.can_navigate_to(WizardStep::Configure));
    }

    #[test]
    fn test_append_results_updates_total() {
        let mut store = store();
        let page = |ids: &[&str]| ids.iter().map(|id| Scene::new(*id, "c")).collect::<Vec<_>>();
        store
            .dispatch(OrderAction::ReplaceResults { scenes: page(&["a", "b"]), total_matched: 5 })
            .unwrap();
        store
            .dispatch(OrderAction::AppendResults { scenes: page(&["c"]), total_matched: 4 })
            .unwrap();

        let ids: Vec<&str> = store.draft().results().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.draft().total_matched(), 4);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = store();
        browse_ready(&mut store);
        store.dispatch(OrderAction::Reset).unwrap();
        assert_eq!(store.draft(), &OrderDraft::default());
    }
}
