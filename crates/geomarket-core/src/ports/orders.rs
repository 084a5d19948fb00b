use crate::error::Result;
use crate::models::{OrderRequest, OrderResponse};
use async_trait::async_trait;

/// Port for order submission and lookup
#[async_trait]
pub trait OrderDesk: Send + Sync {
    /// Submit an order as a single request
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse>;

    /// List all orders known to the desk
    async fn list_orders(&self) -> Result<Vec<OrderResponse>>;

    /// Get an order by id
    async fn get_order(&self, order_id: &str) -> Result<Option<OrderResponse>>;
}
