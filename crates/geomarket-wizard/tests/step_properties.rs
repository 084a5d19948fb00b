use chrono::NaiveDate;
use geomarket_core::models::{OrderMode, ProductCatalog, Scene};
use geomarket_wizard::{OrderAction, OrderStore, SchedulePatch, WizardStep};
use proptest::prelude::*;

/// Wizard inputs in the order the steps ask for them
fn documented_order(mode: OrderMode, any_available: bool) -> Vec<OrderAction> {
    let catalog = ProductCatalog::builtin();
    let family = catalog.family("imagery").unwrap().clone();

    let mut actions = vec![OrderAction::SelectFamily(family), OrderAction::SetOrderMode(mode)];
    if any_available {
        actions.push(OrderAction::SetAnyAvailable(true));
    } else {
        actions.push(OrderAction::SelectProductType("infrared".to_string()));
        actions.push(OrderAction::SelectTier("operational".to_string()));
    }
    actions.push(OrderAction::AddScene(Scene::new("S1", "sentinel-2-l2a")));
    actions.push(OrderAction::UpdateSchedule(SchedulePatch::named("Survey")));
    actions.push(OrderAction::UpdateSchedule(SchedulePatch {
        start_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1)),
        ..Default::default()
    }));
    actions.push(OrderAction::UpdateSchedule(SchedulePatch {
        end_date: Some(NaiveDate::from_ymd_opt(2024, 6, 30)),
        ..Default::default()
    }));
    actions
}

fn mode_strategy() -> impl Strategy<Value = OrderMode> {
    prop_oneof![Just(OrderMode::Historical), Just(OrderMode::Future)]
}

proptest! {
    #[test]
    fn step_never_decreases_while_filling_in(mode in mode_strategy(), any_available in any::<bool>()) {
        let mut store = OrderStore::new(ProductCatalog::builtin());
        let mut previous = store.step();
        prop_assert_eq!(previous, WizardStep::SelectFamily);

        for action in documented_order(mode, any_available) {
            let step = store.dispatch(action).unwrap();
            prop_assert!((1..=6).contains(&step.number()));
            prop_assert!(step >= previous);
            previous = step;
        }
        prop_assert_eq!(previous, WizardStep::Review);
    }

    #[test]
    fn step_in_range_for_any_prefix(
        mode in mode_strategy(),
        any_available in any::<bool>(),
        prefix in 0usize..9,
    ) {
        let mut store = OrderStore::new(ProductCatalog::builtin());
        for action in documented_order(mode, any_available).into_iter().take(prefix) {
            store.dispatch(action).unwrap();
        }
        let step = store.step();
        prop_assert!((1..=6).contains(&step.number()));
        prop_assert_ne!(step, WizardStep::Configure);
        prop_assert!(store.can_navigate_to(step));
    }

    #[test]
    fn toggling_twice_restores_selection(ids in prop::collection::vec("[A-D]", 1..10)) {
        let mut store = OrderStore::new(ProductCatalog::builtin());
        for id in &ids {
            store.dispatch(OrderAction::AddScene(Scene::new(id.clone(), "c"))).unwrap();
        }
        let before = store.draft().clone();
        let scene = Scene::new(ids[0].clone(), "c");
        store.dispatch(OrderAction::ToggleScene(scene.clone())).unwrap();
        store.dispatch(OrderAction::ToggleScene(scene)).unwrap();
        // Same set; the toggled scene moves to the end
        prop_assert_eq!(store.draft().selected_scenes().len(), before.selected_scenes().len());
        prop_assert!(store.draft().selected_scenes().contains(&ids[0]));
    }
}
