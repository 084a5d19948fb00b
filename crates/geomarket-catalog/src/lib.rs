//! geomarket Catalog - Adapters for the catalog and order ports
//!
//! [`MarketplaceClient`] talks to the marketplace HTTP API; the in-memory
//! adapters back tests and offline use.

pub mod client;
pub mod memory;

pub use client::MarketplaceClient;
pub use memory::{MemoryCatalog, MemoryOrderDesk};
