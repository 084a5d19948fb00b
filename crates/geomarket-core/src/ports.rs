//! Port trait definitions
//!
//! These traits define the interfaces that catalog and order adapters must implement.

pub mod catalog;
pub mod orders;

pub use catalog::CatalogProvider;
pub use orders::OrderDesk;
