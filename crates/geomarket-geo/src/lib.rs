//! geomarket Geo - Area-of-interest geometry and bounding boxes
//!
//! This crate turns drawn areas of interest (circles and polygons) into the
//! bounding boxes the catalog search accepts, and answers simple footprint
//! predicates against those boxes.

pub mod aoi;
pub mod bbox;
pub mod spatial;
pub mod validation;

pub use aoi::{AoiShape, AreaOfInterest};
pub use bbox::{circle_bbox, polygon_bbox, KM_PER_DEGREE};
