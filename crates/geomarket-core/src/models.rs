pub mod geometry;
pub mod order;
pub mod product;
pub mod scene;
pub mod search;

pub use geometry::{BoundingBox, Geometry, GeometryType, LatLng};
pub use order::{
    DayOfWeek, Frequency, OrderConfiguration, OrderMode, OrderRequest, OrderResponse,
    OrderSchedule, PointOfInterest, Priority,
};
pub use product::{ProductCatalog, ProductFamily, ProductTier, ProductType};
pub use scene::{ResultOrder, Scene, SceneId, PLACEHOLDER_THUMBNAIL};
pub use search::{datetime_interval, CatalogSearchRequest, CatalogSearchResponse, SearchParams};
