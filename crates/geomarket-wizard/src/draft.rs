//! In-progress order selections.
//!
//! Fields are read through accessors; every change goes through
//! [`crate::store::reduce`] so the downstream resets always happen.

use chrono::NaiveDate;
use geomarket_core::models::{
    DayOfWeek, Frequency, OrderConfiguration, OrderMode, OrderSchedule, PointOfInterest, Priority,
    ProductFamily, ProductTier, ProductType, ResultOrder, Scene, SearchParams,
};
use geomarket_geo::AreaOfInterest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::selection::SceneSelection;
use crate::step::WizardStep;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub(crate) family: Option<ProductFamily>,
    pub(crate) order_mode: Option<OrderMode>,
    #[serde(default)]
    pub(crate) any_available: bool,
    pub(crate) product_type: Option<ProductType>,
    pub(crate) tier: Option<ProductTier>,
    #[serde(default)]
    pub(crate) configuration: OrderConfiguration,
    #[serde(default)]
    pub(crate) schedule: OrderSchedule,
    pub(crate) area_of_interest: Option<AreaOfInterest>,
    #[serde(default)]
    pub(crate) search_params: SearchParams,
    #[serde(default)]
    pub(crate) results: Vec<Scene>,
    #[serde(default)]
    pub(crate) total_matched: usize,
    #[serde(default)]
    pub(crate) selected_scenes: SceneSelection,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(&self) -> Option<&ProductFamily> {
        self.family.as_ref()
    }

    pub fn order_mode(&self) -> Option<OrderMode> {
        self.order_mode
    }

    pub fn any_available(&self) -> bool {
        self.any_available
    }

    pub fn product_type(&self) -> Option<&ProductType> {
        self.product_type.as_ref()
    }

    pub fn tier(&self) -> Option<&ProductTier> {
        self.tier.as_ref()
    }

    pub fn configuration(&self) -> &OrderConfiguration {
        &self.configuration
    }

    pub fn schedule(&self) -> &OrderSchedule {
        &self.schedule
    }

    pub fn area_of_interest(&self) -> Option<&AreaOfInterest> {
        self.area_of_interest.as_ref()
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    pub fn results(&self) -> &[Scene] {
        &self.results
    }

    pub fn total_matched(&self) -> usize {
        self.total_matched
    }

    pub fn selected_scenes(&self) -> &SceneSelection {
        &self.selected_scenes
    }

    /// Current wizard step, derived on every call
    pub fn step(&self) -> WizardStep {
        WizardStep::derive(self)
    }

    /// Whether the catalog reported more matches than are loaded
    pub fn has_more_results(&self) -> bool {
        self.results.len() < self.total_matched
    }

    /// Loaded results that pass the cloud-cover filter.
    ///
    /// Scenes with unknown cloud cover stay visible.
    pub fn visible_results(&self) -> Vec<&Scene> {
        let max = self.search_params.cloud_cover_max;
        self.results
            .iter()
            .filter(|scene| scene.cloud_cover().map_or(true, |cover| cover <= max))
            .collect()
    }

    /// [`Self::visible_results`] in display order. The sort is stable, so ties
    /// keep catalog order.
    pub fn sorted_results(&self, order: ResultOrder) -> Vec<&Scene> {
        let mut scenes = self.visible_results();
        scenes.sort_by(|a, b| order.compare(a, b));
        scenes
    }

    /// Clear everything that depends on the product choice
    pub(crate) fn reset_downstream(&mut self) {
        self.product_type = None;
        self.tier = None;
        self.area_of_interest = None;
        self.results.clear();
        self.total_matched = 0;
        self.selected_scenes.clear();
        self.search_params = SearchParams::default();
    }
}

/// Partial update of [`OrderConfiguration`]; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationPatch {
    pub poi: Option<Option<PointOfInterest>>,
    pub cloud_cover_max: Option<f64>,
    pub spectral_bands: Option<BTreeSet<String>>,
    pub delivery_format: Option<String>,
    pub processing_level: Option<String>,
    pub notes: Option<String>,
}

impl ConfigurationPatch {
    pub(crate) fn apply(self, target: &mut OrderConfiguration) {
        if let Some(poi) = self.poi {
            target.poi = poi;
        }
        if let Some(cloud_cover_max) = self.cloud_cover_max {
            target.cloud_cover_max = cloud_cover_max;
        }
        if let Some(bands) = self.spectral_bands {
            target.spectral_bands = bands;
        }
        if let Some(format) = self.delivery_format {
            target.delivery_format = format;
        }
        if let Some(level) = self.processing_level {
            target.processing_level = level;
        }
        if let Some(notes) = self.notes {
            target.notes = notes;
        }
    }
}

/// Partial update of [`OrderSchedule`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulePatch {
    pub order_name: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub recurring: Option<bool>,
    pub frequency: Option<Option<Frequency>>,
    pub day_of_week: Option<Option<DayOfWeek>>,
    pub delivery_window: Option<String>,
}

impl SchedulePatch {
    /// Patch that only sets the order name
    pub fn named(name: impl Into<String>) -> Self {
        Self { order_name: Some(name.into()), ..Self::default() }
    }

    pub(crate) fn apply(self, target: &mut OrderSchedule) {
        if let Some(name) = self.order_name {
            target.order_name = name;
        }
        if let Some(date) = self.start_date {
            target.start_date = date;
        }
        if let Some(date) = self.end_date {
            target.end_date = date;
        }
        if let Some(date) = self.expiration_date {
            target.expiration_date = date;
        }
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
        if let Some(recurring) = self.recurring {
            target.recurring = recurring;
        }
        if let Some(frequency) = self.frequency {
            target.frequency = frequency;
        }
        if let Some(day) = self.day_of_week {
            target.day_of_week = day;
        }
        if let Some(window) = self.delivery_window {
            target.delivery_window = window;
        }
    }
}

/// Partial update of [`SearchParams`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParamsPatch {
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub collections: Option<Vec<String>>,
    pub cloud_cover_max: Option<f64>,
    pub limit: Option<usize>,
}

impl SearchParamsPatch {
    pub(crate) fn apply(self, target: &mut SearchParams) {
        if let Some(date) = self.start_date {
            target.start_date = date;
        }
        if let Some(date) = self.end_date {
            target.end_date = date;
        }
        if let Some(collections) = self.collections {
            target.collections = collections;
        }
        if let Some(max) = self.cloud_cover_max {
            target.cloud_cover_max = max;
        }
        if let Some(limit) = self.limit {
            target.limit = limit;
        }
    }
}
