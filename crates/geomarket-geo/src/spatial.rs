//! Footprint predicates over scene geometries.

use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Coord, Intersects, LineString, MultiPolygon, Point, Polygon, Rect};
use geomarket_core::models::{BoundingBox, Geometry, Scene};

use crate::bbox::rect_to_bbox;

/// Convert a footprint into a geo geometry
pub fn to_geo(geometry: &Geometry) -> geo::Geometry<f64> {
    match geometry {
        Geometry::Point { coordinates } => {
            geo::Geometry::Point(Point::new(coordinates[0], coordinates[1]))
        }
        Geometry::Polygon { coordinates } => geo::Geometry::Polygon(rings_to_polygon(coordinates)),
        Geometry::MultiPolygon { coordinates } => geo::Geometry::MultiPolygon(MultiPolygon::new(
            coordinates.iter().map(|rings| rings_to_polygon(rings)).collect(),
        )),
    }
}

fn rings_to_polygon(rings: &[Vec<[f64; 2]>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| LineString::from(ring.clone()));
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

/// Bounding box of a footprint, `None` when it has no positions
pub fn footprint_bbox(geometry: &Geometry) -> Option<BoundingBox> {
    to_geo(geometry).bounding_rect().map(rect_to_bbox)
}

/// Whether a footprint touches the box
pub fn footprint_intersects(geometry: &Geometry, bbox: &BoundingBox) -> bool {
    let rect = Rect::new(
        Coord { x: bbox.min_lng, y: bbox.min_lat },
        Coord { x: bbox.max_lng, y: bbox.max_lat },
    );
    let area = geo::Geometry::Polygon(rect.to_polygon());
    to_geo(geometry).intersects(&area)
}

/// Scenes without a footprint never match a spatial filter
pub fn scene_intersects(scene: &Scene, bbox: &BoundingBox) -> bool {
    scene.geometry.as_ref().is_some_and(|g| footprint_intersects(g, bbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Geometry {
        Geometry::polygon(vec![vec![[min, min], [max, min], [max, max], [min, max], [min, min]]])
    }

    #[test]
    fn test_footprint_bbox() {
        let bbox = footprint_bbox(&square(1.0, 3.0)).unwrap();
        assert_eq!(bbox, BoundingBox::new(1.0, 1.0, 3.0, 3.0));
    }

    #[test]
    fn test_overlapping_footprint_intersects() {
        let area = BoundingBox::new(2.0, 2.0, 5.0, 5.0);
        assert!(footprint_intersects(&square(1.0, 3.0), &area));
        assert!(!footprint_intersects(&square(6.0, 7.0), &area));
    }

    #[test]
    fn test_point_footprint() {
        let area = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(footprint_intersects(&Geometry::point(0.5, 0.5), &area));
        assert!(!footprint_intersects(&Geometry::point(1.5, 0.5), &area));
    }

    #[test]
    fn test_scene_without_footprint_never_matches() {
        let scene = Scene::new("S1", "sentinel-2-l2a");
        assert!(!scene_intersects(&scene, &BoundingBox::world()));
    }
}
