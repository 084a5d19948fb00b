//! Areas of interest drawn on the map.
//!
//! An [`AreaOfInterest`] always carries the bounding box of its shape, so the
//! two can never drift apart: every constructor validates the shape and
//! derives the box in the same step.

use std::fmt;

use geojson::GeoJson;
use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::{BoundingBox, LatLng};
use serde::{Deserialize, Serialize};

use crate::bbox::{circle_bbox, polygon_bbox};
use crate::validation::{validate_circle, validate_polygon};

/// Shape drawn by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AoiShape {
    Circle {
        center: LatLng,
        #[serde(rename = "radiusKm")]
        radius_km: f64,
    },
    /// Outer ring as `[lng, lat]`; closing vertex optional
    Polygon { coordinates: Vec<[f64; 2]> },
}

impl AoiShape {
    pub fn circle(center: LatLng, radius_km: f64) -> Self {
        AoiShape::Circle { center, radius_km }
    }

    pub fn polygon(coordinates: Vec<[f64; 2]>) -> Self {
        AoiShape::Polygon { coordinates }
    }
}

/// A validated shape together with its search bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AoiShape", into = "AoiRecord")]
pub struct AreaOfInterest {
    shape: AoiShape,
    bbox: BoundingBox,
}

/// Serialized form: the shape with its derived box alongside
#[derive(Serialize)]
struct AoiRecord {
    #[serde(flatten)]
    shape: AoiShape,
    bbox: BoundingBox,
}

impl From<AreaOfInterest> for AoiRecord {
    fn from(aoi: AreaOfInterest) -> Self {
        AoiRecord { shape: aoi.shape, bbox: aoi.bbox }
    }
}

impl TryFrom<AoiShape> for AreaOfInterest {
    type Error = MarketError;

    fn try_from(shape: AoiShape) -> Result<Self> {
        AreaOfInterest::from_shape(shape)
    }
}

impl AreaOfInterest {
    pub fn circle(center: LatLng, radius_km: f64) -> Result<Self> {
        Self::from_shape(AoiShape::circle(center, radius_km))
    }

    pub fn polygon(coordinates: Vec<[f64; 2]>) -> Result<Self> {
        Self::from_shape(AoiShape::polygon(coordinates))
    }

    /// Validate a shape and derive its bounding box
    pub fn from_shape(shape: AoiShape) -> Result<Self> {
        let bbox = match &shape {
            AoiShape::Circle { center, radius_km } => {
                validate_circle(*center, *radius_km).into_result()?;
                circle_bbox(*center, *radius_km)
            }
            AoiShape::Polygon { coordinates } => {
                validate_polygon(coordinates).into_result()?;
                polygon_bbox(coordinates).ok_or_else(|| MarketError::InvalidGeometry {
                    reason: "Polygon has no vertices".to_string(),
                })?
            }
        };
        Ok(Self { shape, bbox })
    }

    /// Replace the shape after an edit. On error the area is left untouched.
    pub fn reshape(&mut self, shape: AoiShape) -> Result<()> {
        *self = Self::from_shape(shape)?;
        Ok(())
    }

    /// Read the outer ring of a GeoJSON polygon.
    ///
    /// Accepts a bare geometry, a feature, or a feature collection (first
    /// feature wins).
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let parsed: GeoJson = text.parse().map_err(|e: geojson::Error| {
            MarketError::InvalidGeometry { reason: format!("Invalid GeoJSON: {}", e) }
        })?;

        let geometry = match parsed {
            GeoJson::Geometry(geometry) => Some(geometry),
            GeoJson::Feature(feature) => feature.geometry,
            GeoJson::FeatureCollection(collection) => {
                collection.features.into_iter().find_map(|f| f.geometry)
            }
        }
        .ok_or_else(|| MarketError::InvalidGeometry {
            reason: "GeoJSON contains no geometry".to_string(),
        })?;

        match geometry.value {
            geojson::Value::Polygon(rings) => {
                let exterior = rings.into_iter().next().unwrap_or_default();
                let coordinates = exterior
                    .iter()
                    .map(|position| match position.as_slice() {
                        [lng, lat, ..] => Ok([*lng, *lat]),
                        _ => Err(MarketError::InvalidGeometry {
                            reason: "Position needs at least two coordinates".to_string(),
                        }),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::polygon(coordinates)
            }
            other => Err(MarketError::InvalidGeometry {
                reason: format!("Expected a Polygon, found {}", geojson_type(&other)),
            }),
        }
    }

    pub fn shape(&self) -> &AoiShape {
        &self.shape
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// One-line summary, e.g. `Circle (12.5 km)` or `Polygon (5 vertices)`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

fn geojson_type(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl fmt::Display for AreaOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            AoiShape::Circle { radius_km, .. } => write!(f, "Circle ({:.1} km)", radius_km),
            AoiShape::Polygon { coordinates } => {
                let open = match (coordinates.first(), coordinates.last()) {
                    (Some(first), Some(last)) if coordinates.len() > 1 && first == last => {
                        coordinates.len() - 1
                    }
                    _ => coordinates.len(),
                };
                write!(f, "Polygon ({} vertices)", open)
            }
        }
    }
}
