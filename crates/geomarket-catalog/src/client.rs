use async_trait::async_trait;
use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::{
    CatalogSearchRequest, CatalogSearchResponse, OrderRequest, OrderResponse, Scene,
};
use geomarket_core::ports::{CatalogProvider, OrderDesk};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// HTTP client for the marketplace API (catalog search and orders)
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    /// Base URL of the API, e.g. "http://localhost:8080/api"
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl MarketplaceClient {
    /// Create a new client; a trailing slash on the base URL is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client: reqwest::Client::new() }
    }

    /// Create with the default local API URL
    pub fn localhost() -> Self {
        Self::new(geomarket_core::config::DEFAULT_API_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `{base}/orders/{id}` with the id encoded as a single path segment
    fn order_url(&self, order_id: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url("orders"))
            .map_err(|e| self.desk_error(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| self.desk_error(format!("Invalid API URL: {}", self.base_url)))?
            .push(order_id);
        Ok(url)
    }

    fn catalog_error(&self, reason: String) -> MarketError {
        MarketError::CatalogUnavailable {
            reason,
            remediation: format!(
                "Ensure the marketplace API is running at {} or set GEOMARKET_API_URL",
                self.base_url
            ),
        }
    }

    fn desk_error(&self, reason: String) -> MarketError {
        MarketError::OrderDeskUnavailable {
            reason,
            remediation: format!("Ensure the order service is reachable at {}", self.base_url),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> std::result::Result<T, String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("API error ({}): {}", status, body));
        }
        response.json::<T>().await.map_err(|e| format!("Failed to parse response: {}", e))
    }
}

#[async_trait]
impl CatalogProvider for MarketplaceClient {
    fn provider_name(&self) -> &str {
        "marketplace"
    }

    async fn search(&self, request: &CatalogSearchRequest) -> Result<CatalogSearchResponse> {
        debug!(body = %serde_json::to_string(request)?, "POST catalog/search");

        let response = self
            .client
            .post(self.url("catalog/search"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.catalog_error(format!("Failed to connect: {}", e)))?;

        let raw: RawSearchResponse =
            Self::read_json(response).await.map_err(|reason| self.catalog_error(reason))?;
        Ok(raw.into_response())
    }

    async fn collections(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("catalog/collections"))
            .send()
            .await
            .map_err(|e| self.catalog_error(format!("Failed to connect: {}", e)))?;

        let raw: RawCollections =
            Self::read_json(response).await.map_err(|reason| self.catalog_error(reason))?;
        Ok(raw.into_ids())
    }
}

#[async_trait]
impl OrderDesk for MarketplaceClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        let response = self
            .client
            .post(self.url("orders"))
            .json(request)
            .send()
            .await
            .map_err(|e| MarketError::OrderSubmissionFailed {
                reason: format!("Failed to connect to {}: {}", self.base_url, e),
            })?;

        Self::read_json(response)
            .await
            .map_err(|reason| MarketError::OrderSubmissionFailed { reason })
    }

    async fn list_orders(&self) -> Result<Vec<OrderResponse>> {
        let response = self
            .client
            .get(self.url("orders"))
            .send()
            .await
            .map_err(|e| self.desk_error(format!("Failed to connect: {}", e)))?;

        Self::read_json(response).await.map_err(|reason| self.desk_error(reason))
    }

    async fn get_order(&self, order_id: &str) -> Result<Option<OrderResponse>> {
        let response = self
            .client
            .get(self.order_url(order_id)?)
            .send()
            .await
            .map_err(|e| self.desk_error(format!("Failed to connect: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(response).await.map(Some).map_err(|reason| self.desk_error(reason))
    }
}

/// Search response as sent by the API or a STAC server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchResponse {
    #[serde(default)]
    features: Vec<Scene>,
    number_matched: Option<usize>,
    number_returned: Option<usize>,
    context: Option<SearchContext>,
}

#[derive(Debug, Deserialize)]
struct SearchContext {
    matched: Option<usize>,
}

impl RawSearchResponse {
    /// Total falls back to `context.matched`, then to the page length
    fn into_response(self) -> CatalogSearchResponse {
        let number_matched = self
            .number_matched
            .or(self.context.and_then(|c| c.matched))
            .unwrap_or(self.features.len());
        let number_returned = self.number_returned.unwrap_or(self.features.len());
        CatalogSearchResponse { features: self.features, number_matched, number_returned }
    }
}

/// Either a plain id list or a STAC `{ "collections": [{ "id": .. }] }` body
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCollections {
    Ids(Vec<String>),
    Stac { collections: Vec<CollectionRef> },
}

#[derive(Debug, Deserialize)]
struct CollectionRef {
    id: String,
}

impl RawCollections {
    fn into_ids(self) -> Vec<String> {
        match self {
            RawCollections::Ids(ids) => ids,
            RawCollections::Stac { collections } => collections.into_iter().map(|c| c.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_joining() {
        let client = MarketplaceClient::new("http://example.test/api/");
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.url("catalog/search"), "http://example.test/api/catalog/search");
        assert_eq!(client.url("/orders"), "http://example.test/api/orders");
    }

    #[test]
    fn test_order_url_encodes_id() {
        let client = MarketplaceClient::new("http://example.test/api/");
        let url = client.order_url("ORD 1/2?x").unwrap();
        assert_eq!(url.as_str(), "http://example.test/api/orders/ORD%201%2F2%3Fx");

        let plain = client.order_url("ORD-1A2B3C4D").unwrap();
        assert_eq!(plain.as_str(), "http://example.test/api/orders/ORD-1A2B3C4D");
    }

    #[test]
    fn test_localhost_default() {
        assert_eq!(MarketplaceClient::localhost().base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_search_response_number_matched() {
        let raw: RawSearchResponse = serde_json::from_str(
            r#"{"features":[{"id":"a"},{"id":"b"}],"numberMatched":45,"numberReturned":2}"#,
        )
        .unwrap();
        let response = raw.into_response();
        assert_eq!(response.number_matched, 45);
        assert_eq!(response.features[0].id, "a");
    }

    #[test]
    fn test_search_response_context_fallback() {
        let raw: RawSearchResponse =
            serde_json::from_str(r#"{"features":[{"id":"a"}],"context":{"matched":12}}"#).unwrap();
        let response = raw.into_response();
        assert_eq!(response.number_matched, 12);
        assert_eq!(response.number_returned, 1);
    }

    #[test]
    fn test_search_response_without_totals() {
        let raw: RawSearchResponse =
            serde_json::from_str(r#"{"features":[{"id":"a"},{"id":"b"},{"id":"c"}]}"#).unwrap();
        assert_eq!(raw.into_response().number_matched, 3);
    }

    #[test]
    fn test_collections_both_shapes() {
        let plain: RawCollections = serde_json::from_str(r#"["sentinel-2-l2a","landsat-c2-l2"]"#).unwrap();
        assert_eq!(plain.into_ids(), vec!["sentinel-2-l2a", "landsat-c2-l2"]);

        let stac: RawCollections =
            serde_json::from_str(r#"{"collections":[{"id":"sentinel-1-grd","title":"S1"}]}"#).unwrap();
        assert_eq!(stac.into_ids(), vec!["sentinel-1-grd"]);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_retryable() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = MarketplaceClient::new("http://127.0.0.1:9/api");
        let err = client.collections().await.unwrap_err();
        assert!(matches!(err, MarketError::CatalogUnavailable { .. }));
        assert!(err.is_retryable());
    }
}
