//! Catalog scenes (STAC items) and the display helpers built on them.

use crate::models::geometry::Geometry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Image shown when a scene carries no preview asset
pub const PLACEHOLDER_THUMBNAIL: &str = "assets/placeholder-scene.svg";

/// Asset keys checked for a preview image, in order of preference
const PREVIEW_ASSET_KEYS: [&str; 3] = ["thumbnail", "overview", "preview"];

pub type SceneId = String;

/// A single catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    #[serde(rename = "type", default = "feature_type")]
    pub item_type: String,
    /// Footprint; unsupported GeoJSON shapes are read as `None`
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub assets: Map<String, Value>,
    #[serde(default)]
    pub collection: String,
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<Geometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Geometry::from_geojson))
}

impl Scene {
    pub fn new(id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: feature_type(),
            geometry: None,
            properties: Map::new(),
            assets: Map::new(),
            collection: collection.into(),
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_asset(mut self, key: impl Into<String>, href: impl Into<String>) -> Self {
        self.assets.insert(key.into(), serde_json::json!({ "href": href.into() }));
        self
    }

    /// Acquisition time from the `datetime` property
    pub fn acquired_at(&self) -> Option<DateTime<Utc>> {
        self.properties
            .get("datetime")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Cloud cover percentage from the `eo:cloud_cover` property
    pub fn cloud_cover(&self) -> Option<f64> {
        self.properties.get("eo:cloud_cover").and_then(Value::as_f64)
    }

    /// First available preview href (thumbnail, then overview, then preview)
    pub fn preview_href(&self) -> Option<&str> {
        PREVIEW_ASSET_KEYS.iter().find_map(|key| {
            self.assets.get(*key).and_then(|asset| asset.get("href")).and_then(Value::as_str)
        })
    }

    pub fn preview_href_or_placeholder(&self) -> &str {
        self.preview_href().unwrap_or(PLACEHOLDER_THUMBNAIL)
    }

    pub fn display_date(&self) -> String {
        self.acquired_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn display_cloud_cover(&self) -> String {
        self.cloud_cover().map(|cc| format!("{:.1}", cc)).unwrap_or_else(|| "N/A".to_string())
    }
}

/// How loaded results are ordered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Latest acquisition first; undated scenes last
    #[default]
    Newest,
    /// Lowest cloud cover first; unknown cover ranks as 100%
    Clearest,
}

impl ResultOrder {
    pub fn compare(self, a: &Scene, b: &Scene) -> Ordering {
        match self {
            // None < Some, so reversing puts undated scenes at the end
            ResultOrder::Newest => b.acquired_at().cmp(&a.acquired_at()),
            ResultOrder::Clearest => {
                let cover = |scene: &Scene| scene.cloud_cover().unwrap_or(100.0);
                cover(a).total_cmp(&cover(b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sentinel_item() -> Value {
        json!({
            "type": "Feature",
            "id": "S2A_MSIL2A_20240301",
            "collection": "sentinel-2-l2a",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[10.0, 45.0], [11.0, 45.0], [11.0, 46.0], [10.0, 45.0]]]
            },
            "properties": {
                "datetime": "2024-03-01T10:20:30Z",
                "eo:cloud_cover": 12.345
            },
            "assets": {
                "overview": { "href": "https://example.test/overview.png" }
            },
            "stac_version": "1.0.0"
        })
    }

    fn dated(id: &str, datetime: Option<&str>, cloud: Option<f64>) -> Scene {
        let mut scene = Scene::new(id, "sentinel-2-l2a");
        if let Some(datetime) = datetime {
            scene = scene.with_property("datetime", json!(datetime));
        }
        if let Some(cloud) = cloud {
            scene = scene.with_property("eo:cloud_cover", json!(cloud));
        }
        scene
    }

    fn ordered(mut scenes: Vec<Scene>, order: ResultOrder) -> Vec<String> {
        scenes.sort_by(|a, b| order.compare(a, b));
        scenes.into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_newest_puts_undated_scenes_last() {
        let scenes = vec![
            dated("undated", None, Some(1.0)),
            dated("march", Some("2024-03-01T10:00:00Z"), None),
            dated("may", Some("2024-05-01T10:00:00Z"), Some(50.0)),
            dated("garbled", Some("yesterday"), Some(0.0)),
        ];
        assert_eq!(ordered(scenes, ResultOrder::Newest), vec!["may", "march", "undated", "garbled"]);
    }

    #[test]
    fn test_clearest_ranks_unknown_cover_as_full() {
        let scenes = vec![
            dated("unknown", None, None),
            dated("cloudy", None, Some(100.0)),
            dated("hazy", None, Some(40.5)),
            dated("clear", None, Some(2.0)),
        ];
        // Stable sort: "unknown" ties with "cloudy" and keeps its place
        assert_eq!(ordered(scenes, ResultOrder::Clearest), vec!["clear", "hazy", "unknown", "cloudy"]);
    }

    #[test]
    fn test_parse_stac_item() {
        let scene: Scene = serde_json::from_value(sentinel_item()).unwrap();
        assert_eq!(scene.id, "S2A_MSIL2A_20240301");
        assert_eq!(scene.collection, "sentinel-2-l2a");
        assert!(scene.geometry.is_some());
        assert_eq!(scene.display_date(), "2024-03-01");
        assert_eq!(scene.display_cloud_cover(), "12.3");
    }

    #[test]
    fn test_preview_falls_back_through_asset_keys() {
        let scene: Scene = serde_json::from_value(sentinel_item()).unwrap();
        assert_eq!(scene.preview_href(), Some("https://example.test/overview.png"));

        let scene = scene.with_asset("thumbnail", "https://example.test/thumb.png");
        assert_eq!(scene.preview_href(), Some("https://example.test/thumb.png"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let scene = Scene::new("bare", "landsat-c2-l2");
        assert_eq!(scene.preview_href_or_placeholder(), PLACEHOLDER_THUMBNAIL);
        assert_eq!(scene.display_date(), "N/A");
        assert_eq!(scene.display_cloud_cover(), "N/A");
    }

    #[test]
    fn test_unsupported_footprint_is_dropped() {
        let mut item = sentinel_item();
        item["geometry"] = json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] });
        let scene: Scene = serde_json::from_value(item).unwrap();
        assert!(scene.geometry.is_none());
    }
}
