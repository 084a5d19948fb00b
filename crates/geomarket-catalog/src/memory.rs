//! In-memory catalog and order desk for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::{
    CatalogSearchRequest, CatalogSearchResponse, OrderRequest, OrderResponse, Scene,
};
use geomarket_core::ports::{CatalogProvider, OrderDesk};
use geomarket_geo::spatial::scene_intersects;
use std::sync::{Arc, RwLock};

/// In-memory implementation of CatalogProvider
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    scenes: Arc<RwLock<Vec<Scene>>>,
    requests: Arc<RwLock<Vec<CatalogSearchRequest>>>,
    pending_failures: Arc<RwLock<usize>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given scenes
    pub fn with_scenes(scenes: Vec<Scene>) -> Self {
        let catalog = Self::new();
        *catalog.scenes.write().unwrap() = scenes;
        catalog
    }

    pub fn add_scene(&self, scene: Scene) {
        self.scenes.write().unwrap().push(scene);
    }

    /// Make the next `count` searches fail as if the API were down
    pub fn fail_next(&self, count: usize) {
        *self.pending_failures.write().unwrap() = count;
    }

    /// Every search request received, in order, failed ones included
    pub fn requests(&self) -> Vec<CatalogSearchRequest> {
        self.requests.read().unwrap().clone()
    }

    fn take_failure(&self) -> bool {
        let mut pending = self.pending_failures.write().unwrap();
        if *pending == 0 {
            return false;
        }
        *pending -= 1;
        true
    }

    fn matches(scene: &Scene, request: &CatalogSearchRequest, window: Option<(DateTime<Utc>, DateTime<Utc>)>) -> bool {
        if let Some(bbox) = &request.bbox {
            if !scene_intersects(scene, bbox) {
                return false;
            }
        }
        if let Some(collections) = &request.collections {
            if !collections.contains(&scene.collection) {
                return false;
            }
        }
        if let Some((start, end)) = window {
            match scene.acquired_at() {
                Some(at) if at >= start && at <= end => {}
                _ => return false,
            }
        }
        true
    }
}

/// Parse a closed `start/end` RFC 3339 interval
fn parse_interval(datetime: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let invalid = || MarketError::CatalogUnavailable {
        reason: format!("Unsupported datetime filter '{}'", datetime),
        remediation: "Use a closed interval such as 2024-01-01T00:00:00Z/2024-01-31T23:59:59Z"
            .to_string(),
    };
    let (start, end) = datetime.split_once('/').ok_or_else(invalid)?;
    let start = DateTime::parse_from_rfc3339(start).map_err(|_| invalid())?;
    let end = DateTime::parse_from_rfc3339(end).map_err(|_| invalid())?;
    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn search(&self, request: &CatalogSearchRequest) -> Result<CatalogSearchResponse> {
        self.requests.write().unwrap().push(request.clone());

        if self.take_failure() {
            return Err(MarketError::CatalogUnavailable {
                reason: "Simulated catalog outage".to_string(),
                remediation: "Retry the search".to_string(),
            });
        }

        let window = request.datetime.as_deref().map(parse_interval).transpose()?;
        let scenes = self.scenes.read().unwrap();
        let matched: Vec<&Scene> =
            scenes.iter().filter(|scene| Self::matches(scene, request, window)).collect();

        let page = matched
            .iter()
            .skip(request.offset.unwrap_or(0))
            .take(request.limit)
            .map(|scene| (*scene).clone())
            .collect();

        Ok(CatalogSearchResponse::new(page, matched.len()))
    }

    async fn collections(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> =
            self.scenes.read().unwrap().iter().map(|scene| scene.collection.clone()).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

/// In-memory implementation of OrderDesk
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderDesk {
    orders: Arc<RwLock<Vec<OrderResponse>>>,
    requests: Arc<RwLock<Vec<OrderRequest>>>,
    pending_failures: Arc<RwLock<usize>>,
}

impl MemoryOrderDesk {
    /// Create an empty order desk
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` submissions fail
    pub fn fail_next(&self, count: usize) {
        *self.pending_failures.write().unwrap() = count;
    }

    /// Every order request received, failed ones included
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Server-style order id: `ORD-` and eight uppercase hex digits
    fn next_order_id() -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("ORD-{}", id[..8].to_uppercase())
    }
}

#[async_trait]
impl OrderDesk for MemoryOrderDesk {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        self.requests.write().unwrap().push(request.clone());

        {
            let mut pending = self.pending_failures.write().unwrap();
            if *pending > 0 {
                *pending -= 1;
                return Err(MarketError::OrderSubmissionFailed {
                    reason: "Simulated order service outage".to_string(),
                });
            }
        }

        let response = OrderResponse {
            order_id: Self::next_order_id(),
            status: "Submitted".to_string(),
            family_id: request.family_id.clone(),
            product_type_id: request.product_type_id.clone(),
            tier_id: request.tier_id.clone(),
            configuration: request.configuration.clone(),
            schedule: request.schedule.clone(),
            selected_scene_ids: request.selected_scene_ids.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.orders.write().unwrap().push(response.clone());
        Ok(response)
    }

    async fn list_orders(&self) -> Result<Vec<OrderResponse>> {
        Ok(self.orders.read().unwrap().clone())
    }

    async fn get_order(&self, order_id: &str) -> Result<Option<OrderResponse>> {
        Ok(self.orders.read().unwrap().iter().find(|o| o.order_id == order_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomarket_core::models::{BoundingBox, Geometry, OrderConfiguration, OrderSchedule};
    use serde_json::json;

    fn scene(id: &str, collection: &str, lng: f64, lat: f64, datetime: &str) -> Scene {
        Scene::new(id, collection)
            .with_geometry(Geometry::point(lng, lat))
            .with_property("datetime", json!(datetime))
    }

    fn request(limit: usize) -> CatalogSearchRequest {
        CatalogSearchRequest { bbox: None, datetime: None, collections: None, limit, offset: None }
    }

    #[tokio::test]
    async fn test_search_filters_by_bbox_and_collection() {
        let catalog = MemoryCatalog::with_scenes(vec![
            scene("in", "sentinel-2-l2a", 1.0, 1.0, "2024-01-05T10:00:00Z"),
            scene("out", "sentinel-2-l2a", 50.0, 50.0, "2024-01-05T10:00:00Z"),
            scene("other", "landsat-c2-l2", 1.0, 1.0, "2024-01-05T10:00:00Z"),
        ]);

        let mut req = request(10);
        req.bbox = Some(BoundingBox::new(0.0, 0.0, 2.0, 2.0));
        req.collections = Some(vec!["sentinel-2-l2a".to_string()]);

        let response = catalog.search(&req).await.unwrap();
        assert_eq!(response.number_matched, 1);
        assert_eq!(response.features[0].id, "in");
    }

    #[tokio::test]
    async fn test_search_filters_by_datetime() {
        let catalog = MemoryCatalog::with_scenes(vec![
            scene("jan", "c", 0.0, 0.0, "2024-01-31T23:00:00Z"),
            scene("feb", "c", 0.0, 0.0, "2024-02-01T01:00:00Z"),
        ]);
        let mut req = request(10);
        req.datetime = Some("2024-01-01T00:00:00Z/2024-01-31T23:59:59Z".to_string());

        let response = catalog.search(&req).await.unwrap();
        let ids: Vec<&str> = response.features.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["jan"]);
    }

    #[tokio::test]
    async fn test_search_pages_with_offset() {
        let scenes = (0..45).map(|i| Scene::new(format!("S{:02}", i), "c")).collect();
        let catalog = MemoryCatalog::with_scenes(scenes);

        let mut req = request(20);
        req.offset = Some(40);
        let response = catalog.search(&req).await.unwrap();
        assert_eq!(response.number_matched, 45);
        assert_eq!(response.number_returned, 5);
        assert_eq!(response.features[0].id, "S40");
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed() {
        let catalog = MemoryCatalog::with_scenes(vec![Scene::new("a", "c")]);
        catalog.fail_next(1);

        assert!(catalog.search(&request(5)).await.unwrap_err().is_retryable());
        assert_eq!(catalog.search(&request(5)).await.unwrap().features.len(), 1);
        assert_eq!(catalog.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_collections_are_distinct_and_sorted() {
        let catalog = MemoryCatalog::with_scenes(vec![
            Scene::new("a", "sentinel-2-l2a"),
            Scene::new("b", "landsat-c2-l2"),
            Scene::new("c", "sentinel-2-l2a"),
        ]);
        assert_eq!(catalog.collections().await.unwrap(), vec!["landsat-c2-l2", "sentinel-2-l2a"]);
    }

    fn order_request() -> OrderRequest {
        OrderRequest {
            family_id: "imagery".to_string(),
            product_type_id: None,
            tier_id: None,
            configuration: OrderConfiguration::default(),
            schedule: OrderSchedule { order_name: "Harbor".to_string(), ..Default::default() },
            selected_scene_ids: vec!["S1".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_order() {
        let desk = MemoryOrderDesk::new();
        let response = desk.create_order(&order_request()).await.unwrap();

        assert!(response.order_id.starts_with("ORD-"));
        assert_eq!(response.order_id.len(), 12);
        assert_eq!(response.order_id, response.order_id.to_uppercase());
        assert_eq!(response.status, "Submitted");
        assert!(DateTime::parse_from_rfc3339(&response.created_at).is_ok());

        let found = desk.get_order(&response.order_id).await.unwrap();
        assert_eq!(found, Some(response));
        assert!(desk.get_order("ORD-MISSING").await.unwrap().is_none());
        assert_eq!(desk.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_order_is_not_stored() {
        let desk = MemoryOrderDesk::new();
        desk.fail_next(1);
        let err = desk.create_order(&order_request()).await.unwrap_err();
        assert!(matches!(err, MarketError::OrderSubmissionFailed { .. }));
        assert!(desk.list_orders().await.unwrap().is_empty());
        assert_eq!(desk.requests().len(), 1);
    }
}
