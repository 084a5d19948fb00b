//! Shape to bounding-box conversion.

use geo::algorithm::bounding_rect::BoundingRect;
use geo::{LineString, Rect};
use geomarket_core::models::{BoundingBox, LatLng};

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.32;

/// Approximate box around a circle.
///
/// Latitude extent is `radius / 111.32`; the longitude extent is widened by
/// `1 / cos(lat)` for meridian convergence. Good enough for search filtering,
/// not for geodesy: near the poles the longitude extent saturates to the full
/// `[-180, 180]` range. Both axes are clamped to valid coordinates, so a circle
/// crossing the antimeridian is cut off at ±180 rather than wrapped.
pub fn circle_bbox(center: LatLng, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lng_delta = lat_delta / center.lat.to_radians().cos();

    let (min_lng, max_lng) = if lng_delta.is_finite() && lng_delta < 180.0 {
        ((center.lng - lng_delta).max(-180.0), (center.lng + lng_delta).min(180.0))
    } else {
        (-180.0, 180.0)
    };

    BoundingBox::new(
        min_lng,
        (center.lat - lat_delta).max(-90.0),
        max_lng,
        (center.lat + lat_delta).min(90.0),
    )
}

/// Exact box around `[lng, lat]` vertices, `None` when there are none
pub fn polygon_bbox(vertices: &[[f64; 2]]) -> Option<BoundingBox> {
    let ring = LineString::from(vertices.to_vec());
    ring.bounding_rect().map(rect_to_bbox)
}

pub(crate) fn rect_to_bbox(rect: Rect) -> BoundingBox {
    BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
}
