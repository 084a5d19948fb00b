use crate::error::Result;
use crate::models::{CatalogSearchRequest, CatalogSearchResponse};
use async_trait::async_trait;

/// Port for spatio-temporal catalog search
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Human-readable provider name
    fn provider_name(&self) -> &str;

    /// Fetch one page of scenes matching the request
    async fn search(&self, request: &CatalogSearchRequest) -> Result<CatalogSearchResponse>;

    /// List collection identifiers usable as search filters
    async fn collections(&self) -> Result<Vec<String>>;
}
