//! Catalog search parameters and wire types.

use crate::models::geometry::BoundingBox;
use crate::models::scene::Scene;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Search form values held by the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub collections: Vec<String>,
    /// Applied to displayed results only; never sent to the catalog
    pub cloud_cover_max: f64,
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            collections: Vec::new(),
            cloud_cover_max: 30.0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchParams {
    /// Datetime filter for this form, if both bounds are set
    pub fn datetime(&self) -> Option<String> {
        datetime_interval(self.start_date, self.end_date)
    }
}

/// Interval string covering whole days from `start` through `end`.
///
/// Returns `None` unless both bounds are present.
pub fn datetime_interval(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!(
            "{}T00:00:00Z/{}T23:59:59Z",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )),
        _ => None,
    }
}

/// Body of a catalog search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl CatalogSearchRequest {
    /// Build a request from form values; empty collection lists are omitted
    pub fn from_params(params: &SearchParams, bbox: Option<BoundingBox>) -> Self {
        Self {
            bbox,
            datetime: params.datetime(),
            collections: if params.collections.is_empty() {
                None
            } else {
                Some(params.collections.clone())
            },
            limit: params.limit,
            offset: None,
        }
    }

    /// Same filters, starting at `offset`
    pub fn at_offset(&self, offset: usize) -> Self {
        Self { offset: Some(offset), ..self.clone() }
    }
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSearchResponse {
    #[serde(default)]
    pub features: Vec<Scene>,
    /// Total items matching the query, possibly more than returned
    pub number_matched: usize,
    pub number_returned: usize,
}

impl CatalogSearchResponse {
    pub fn new(features: Vec<Scene>, number_matched: usize) -> Self {
        let number_returned = features.len();
        Self { features, number_matched, number_returned }
    }
}
