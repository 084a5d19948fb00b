//! Order configuration, schedule and the order wire types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Whether the order targets archived imagery or future collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    Historical,
    Future,
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderMode::Historical => write!(f, "historical"),
            OrderMode::Future => write!(f, "future"),
        }
    }
}

/// Circular collection area around a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Sensor, processing and delivery preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfiguration {
    pub poi: Option<PointOfInterest>,
    /// Maximum acceptable cloud cover percentage (0-100)
    pub cloud_cover_max: f64,
    pub spectral_bands: BTreeSet<String>,
    #[serde(default)]
    pub delivery_format: String,
    #[serde(default)]
    pub processing_level: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for OrderConfiguration {
    fn default() -> Self {
        Self {
            poi: None,
            cloud_cover_max: 20.0,
            spectral_bands: BTreeSet::new(),
            delivery_format: String::new(),
            processing_level: String::new(),
            notes: String::new(),
        }
    }
}

/// Order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Routine,
    #[default]
    Standard,
    Priority,
    Urgent,
    Flash,
}

impl Priority {
    pub const ALL: [Priority; 5] =
        [Priority::Routine, Priority::Standard, Priority::Priority, Priority::Urgent, Priority::Flash];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] =
        [Frequency::Daily, Frequency::Weekly, Frequency::Biweekly, Frequency::Monthly];
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Timing, priority and recurrence of an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSchedule {
    #[serde(default)]
    pub order_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub recurring: bool,
    pub frequency: Option<Frequency>,
    pub day_of_week: Option<DayOfWeek>,
    /// Preferred delivery window, e.g. "Morning"
    #[serde(default)]
    pub delivery_window: String,
}

impl OrderSchedule {
    pub fn has_name(&self) -> bool {
        !self.order_name.trim().is_empty()
    }
}

/// Body of an order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub family_id: String,
    /// None when the order accepts any available product
    pub product_type_id: Option<String>,
    pub tier_id: Option<String>,
    pub configuration: OrderConfiguration,
    pub schedule: OrderSchedule,
    pub selected_scene_ids: Vec<String>,
}

/// Order as acknowledged by the order desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub status: String,
    pub family_id: String,
    pub product_type_id: Option<String>,
    pub tier_id: Option<String>,
    pub configuration: OrderConfiguration,
    pub schedule: OrderSchedule,
    #[serde(default)]
    pub selected_scene_ids: Vec<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = OrderConfiguration::default();
        assert_eq!(config.cloud_cover_max, 20.0);
        assert!(config.spectral_bands.is_empty());
        assert!(config.poi.is_none());
    }

    #[test]
    fn test_schedule_wire_format() {
        let schedule = OrderSchedule {
            order_name: "Harbor watch".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            recurring: true,
            frequency: Some(Frequency::Weekly),
            day_of_week: Some(DayOfWeek::Monday),
            ..Default::default()
        };

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["orderName"], "Harbor watch");
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["priority"], "Standard");
        assert_eq!(json["frequency"], "Weekly");
        assert_eq!(json["dayOfWeek"], "Monday");
        assert!(json["endDate"].is_null());
    }

    #[test]
    fn test_blank_name_is_missing() {
        let schedule = OrderSchedule { order_name: "   ".to_string(), ..Default::default() };
        assert!(!schedule.has_name());
    }

    #[test]
    fn test_order_mode_serialization() {
        assert_eq!(serde_json::to_string(&OrderMode::Historical).unwrap(), "\"historical\"");
        let mode: OrderMode = serde_json::from_str("\"future\"").unwrap();
        assert_eq!(mode, OrderMode::Future);
    }
}
