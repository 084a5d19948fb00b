//! geomarket Core - Domain models, configuration, and ports
//!
//! This crate contains the marketplace domain types (products, orders,
//! scenes, catalog search wire types) and the port definitions that the
//! catalog and order adapters implement.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{MarketError, Result};
