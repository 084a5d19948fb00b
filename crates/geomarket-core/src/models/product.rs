//! Product families, types and tiers offered by the marketplace.

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};

/// A purchasable tier within a product type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTier {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ground sample distance range, "N/A" for non-imaging products
    pub gsd_range: String,
    pub delivery_time: String,
    /// Price per square kilometre in USD
    pub price_per_sq_km: f64,
}

impl ProductTier {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        gsd_range: impl Into<String>,
        delivery_time: impl Into<String>,
        price_per_sq_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            gsd_range: gsd_range.into(),
            delivery_time: delivery_time.into(),
            price_per_sq_km,
        }
    }
}

/// A product type (sensor or report kind) and its tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub tiers: Vec<ProductTier>,
}

impl ProductType {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        tiers: Vec<ProductTier>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            tiers,
        }
    }

    pub fn tier(&self, tier_id: &str) -> Option<&ProductTier> {
        self.tiers.iter().find(|t| t.id == tier_id)
    }
}

/// Top-level product family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFamily {
    pub id: String,
    pub name: String,
    /// Brand colour hex code
    pub color: String,
    pub description: String,
    /// Whether the family can be ordered through the wizard
    pub available: bool,
    pub types: Vec<ProductType>,
}

impl ProductFamily {
    pub fn product_type(&self, type_id: &str) -> Option<&ProductType> {
        self.types.iter().find(|t| t.id == type_id)
    }

    /// Total number of products across all types and tiers
    pub fn product_count(&self) -> usize {
        self.types.iter().map(|t| t.tiers.len()).sum()
    }
}

/// Read-only catalog of product families
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    families: Vec<ProductFamily>,
}

impl ProductCatalog {
    pub fn new(families: Vec<ProductFamily>) -> Self {
        Self { families }
    }

    pub fn families(&self) -> &[ProductFamily] {
        &self.families
    }

    /// Families that can currently be ordered
    pub fn available(&self) -> impl Iterator<Item = &ProductFamily> {
        self.families.iter().filter(|f| f.available)
    }

    pub fn family(&self, id: &str) -> Result<&ProductFamily> {
        self.families
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| MarketError::FamilyNotFound { id: id.to_string() })
    }

    /// The marketplace's built-in product hierarchy
    pub fn builtin() -> Self {
        Self::new(vec![
            imagery_family(),
            analytic_reports_family(),
            sda_family(),
            subscriptions_family(),
            terrestrial_rf_family(),
        ])
    }
}

fn imagery_family() -> ProductFamily {
    let standard = vec![
        ProductTier::new(
            "precision-pinpoint",
            "Precision Pinpoint",
            "Highest resolution imagery for precision targeting and detailed site analysis",
            "0.3-0.5m",
            "3-6 hours",
            12.50,
        ),
        ProductTier::new(
            "tactical",
            "Tactical",
            "High resolution imagery for tactical planning and area surveillance",
            "0.5-1.0m",
            "6-12 hours",
            8.00,
        ),
        ProductTier::new(
            "operational",
            "Operational",
            "Medium resolution imagery for operational awareness and change detection",
            "1.0-2.5m",
            "12-24 hours",
            4.50,
        ),
        ProductTier::new(
            "theater",
            "Theater",
            "Wide-area coverage imagery for theater-level situational awareness",
            "2.5-5.0m",
            "24-48 hours",
            2.00,
        ),
    ];

    let sat_to_sat = vec![
        ProductTier::new("sat-leo", "LEO", "Low Earth Orbit satellite-to-satellite imaging for close-range characterization", "N/A", "6-12 hours", 25.00),
        ProductTier::new("sat-meo", "MEO", "Medium Earth Orbit satellite-to-satellite imaging for navigation constellation monitoring", "N/A", "12-24 hours", 30.00),
        ProductTier::new("sat-geo", "GEO", "Geostationary orbit satellite-to-satellite imaging for high-value asset characterization", "N/A", "24-48 hours", 45.00),
        ProductTier::new("sat-heo-cislunar", "HEO-Cislunar", "Highly elliptical and cislunar orbit imaging for deep space object characterization", "N/A", "48-72 hours", 75.00),
    ];

    let sky = vec![
        ProductTier::new("sky-leo-detect", "LEO Detect", "Low Earth Orbit detection and tracking from ground-based sky imaging sensors", "N/A", "1-3 hours", 5.00),
        ProductTier::new("sky-meo-monitor", "MEO Monitor", "Medium Earth Orbit monitoring using wide-field sky imaging arrays", "N/A", "3-6 hours", 8.00),
        ProductTier::new("sky-geo-surveillance", "GEO Surveillance", "Geostationary belt surveillance with persistent sky imaging coverage", "N/A", "6-12 hours", 15.00),
        ProductTier::new("sky-deep-space", "Deep Space", "Deep space object detection beyond GEO using high-sensitivity sky imagers", "N/A", "12-24 hours", 20.00),
        ProductTier::new("sky-all-regime", "All-Regime", "Comprehensive sky imaging coverage across all orbital regimes", "N/A", "24-48 hours", 35.00),
    ];

    ProductFamily {
        id: "imagery".to_string(),
        name: "Imagery".to_string(),
        color: "#3B82F6".to_string(),
        description: "Satellite and ground-based imagery products spanning electro-optical, infrared, \
                      SAR, satellite-to-satellite, and sky imaging across multiple resolution tiers"
            .to_string(),
        available: true,
        types: vec![
            ProductType::new("electro-optical", "Electro-Optical (EO)", "Visible-spectrum satellite imagery with sub-meter resolution for precision analysis", "camera", standard.clone()),
            ProductType::new("infrared", "Infrared (IR)", "Thermal and near-infrared imagery for heat signature detection and night operations", "thermometer", standard.clone()),
            ProductType::new("sar", "Synthetic Aperture Radar (SAR)", "All-weather, day/night radar imagery independent of cloud cover and illumination", "radar", standard),
            ProductType::new("sat-to-sat", "Satellite-to-Satellite", "Space-based imaging of other satellites for characterization and proximity awareness", "satellite", sat_to_sat),
            ProductType::new("sky-imagery", "Sky Imagery", "Ground-based optical sensors imaging space objects across orbital regimes", "telescope", sky),
        ],
    }
}

fn analytic_reports_family() -> ProductFamily {
    let tiers = vec![
        ProductTier::new("flash-report", "Flash Report", "Rapid initial assessment with key findings within 24 hours", "N/A", "24 hours", 0.0),
        ProductTier::new("standard-report", "Standard Report", "Comprehensive analysis covering 3-5 disciplines with moderate depth", "N/A", "7 days", 0.0),
        ProductTier::new("deep-analysis", "Deep Analysis", "In-depth multi-discipline assessment with extended research and correlation", "N/A", "14 days", 0.0),
        ProductTier::new("deep-fusion", "Deep Fusion Report", "Maximum-depth fused analysis across all 7+ disciplines with 28-day turnaround", "N/A", "28 days", 0.0),
    ];

    ProductFamily {
        id: "analytic-reports".to_string(),
        name: "Analytic Reports".to_string(),
        color: "#10B981".to_string(),
        description: "Multi-discipline intelligence analysis products ranging from flash reports to deep fusion assessments".to_string(),
        available: false,
        types: vec![
            ProductType::new("site-assessment", "Site Assessment", "Detailed analysis of a specific geographic site or facility", "map-pin", tiers.clone()),
            ProductType::new("activity-monitoring", "Activity Monitoring", "Temporal analysis of activity patterns and changes at locations of interest", "activity", tiers.clone()),
            ProductType::new("threat-assessment", "Threat Assessment", "Evaluation of potential threats based on multi-source intelligence fusion", "shield", tiers),
        ],
    }
}

fn sda_family() -> ProductFamily {
    let regimes = vec![
        ProductTier::new("sda-leo", "LEO", "Low Earth Orbit space domain awareness coverage (200-2000km altitude)", "N/A", "1-6 hours", 0.0),
        ProductTier::new("sda-meo", "MEO", "Medium Earth Orbit space domain awareness coverage (2000-35786km altitude)", "N/A", "6-12 hours", 0.0),
        ProductTier::new("sda-geo", "GEO", "Geostationary orbit space domain awareness coverage (35786km altitude)", "N/A", "12-24 hours", 0.0),
        ProductTier::new("sda-cislunar", "Cislunar", "Cislunar space domain awareness extending beyond GEO to lunar distance", "N/A", "24-48 hours", 0.0),
    ];

    let types = [
        ("conjunction-reports", "Conjunction Reports", "Predicted close approaches between space objects with collision probability assessment", "alert-triangle"),
        ("elsets", "Element Sets (Elsets)", "Orbital element sets for satellite tracking and propagation", "orbit"),
        ("maneuver-detection", "Maneuver Detection", "Detection and characterization of satellite orbital maneuvers", "move"),
        ("observations", "Observations", "Multi-phenomenology observation products including EO, radar, and RF sensors", "eye"),
        ("state-vectors", "State Vectors", "High-precision position and velocity state vectors for tracked objects", "crosshair"),
    ];

    ProductFamily {
        id: "sda".to_string(),
        name: "Space Domain Awareness".to_string(),
        color: "#7C3AED".to_string(),
        description: "Comprehensive space situational awareness products including tracking, \
                      characterization, and threat assessment across all orbital regimes"
            .to_string(),
        available: false,
        types: types
            .iter()
            .map(|(id, name, desc, icon)| ProductType::new(*id, *name, *desc, *icon, regimes.clone()))
            .collect(),
    }
}

fn subscriptions_family() -> ProductFamily {
    let tiers = vec![
        ProductTier::new("sub-basic", "Basic", "Standard subscription with daily updates and basic alerting", "N/A", "Daily", 0.0),
        ProductTier::new("sub-professional", "Professional", "Enhanced subscription with hourly updates, advanced alerting, and API access", "N/A", "Hourly", 0.0),
        ProductTier::new("sub-enterprise", "Enterprise", "Premium subscription with real-time streaming, custom integrations, and SLA guarantees", "N/A", "Real-time", 0.0),
    ];

    let types = [
        ("aircraft-signals", "Aircraft Signals", "ADS-B and secondary radar signal collection for aircraft tracking", "plane"),
        ("data-quality-monitoring", "Data Quality Monitoring", "Continuous monitoring and scoring of data product quality metrics", "check-circle"),
        ("weather-global", "Weather (Global)", "Global weather observation and forecast data for mission planning", "cloud"),
        ("weather-space", "Weather (Space)", "Space weather monitoring including solar activity and geomagnetic conditions", "sun"),
        ("weather-terrestrial", "Weather (Terrestrial)", "Regional terrestrial weather observation and mesoscale forecasting", "cloud-rain"),
        ("maritime-vessel-signals", "Maritime Vessel Signals", "AIS and RF-based maritime vessel tracking and identification", "ship"),
        ("object-characterization", "Object Characterization", "Detailed physical characterization of resident space objects", "box"),
        ("rf-environment", "RF Environment", "Radio frequency environment monitoring and spectrum analysis", "radio"),
        ("sgi-indices", "SGI Indices", "Space governance and sustainability indices for responsible space operations", "bar-chart"),
        ("satellite-beam-coverage", "Satellite Beam Coverage", "Real-time and predicted satellite communication beam footprint mapping", "wifi"),
        ("satellite-metadata-pairs", "Satellite Metadata (PAIRS)", "Paired satellite metadata and association data for constellation analysis", "database"),
        ("space-threat-visualization", "Space Threat Visualization", "Visual threat assessment and situation display for space operations centers", "monitor"),
    ];

    ProductFamily {
        id: "subscriptions".to_string(),
        name: "Subscriptions".to_string(),
        color: "#F59E0B".to_string(),
        description: "Continuous data subscription products spanning aircraft, maritime, weather, \
                      space domain, and RF environment monitoring"
            .to_string(),
        available: false,
        types: types
            .iter()
            .map(|(id, name, desc, icon)| ProductType::new(*id, *name, *desc, *icon, tiers.clone()))
            .collect(),
    }
}

fn terrestrial_rf_family() -> ProductFamily {
    let geolocation = vec![
        ProductTier::new("rf-geo-tactical", "Tactical", "Tactical RF geolocation with high accuracy in limited area of operations", "N/A", "1-3 hours", 0.0),
        ProductTier::new("rf-geo-operational", "Operational", "Operational RF geolocation covering regional area of interest", "N/A", "3-6 hours", 0.0),
        ProductTier::new("rf-geo-theater", "Theater", "Theater-wide RF geolocation for broad area spectrum monitoring", "N/A", "6-12 hours", 0.0),
    ];

    let gnss = vec![
        ProductTier::new("gnss-gps", "GPS", "GPS-only GNSS monitoring and interference detection", "N/A", "Continuous", 0.0),
        ProductTier::new("gnss-dual", "Dual Constellation", "Dual-constellation GNSS monitoring (GPS + GLONASS or Galileo)", "N/A", "Continuous", 0.0),
        ProductTier::new("gnss-multi", "Multi Constellation", "Multi-constellation GNSS monitoring (GPS + GLONASS + Galileo + BeiDou)", "N/A", "Continuous", 0.0),
        ProductTier::new("gnss-premium", "Premium", "Premium all-constellation GNSS monitoring with advanced interference characterization", "N/A", "Continuous", 0.0),
    ];

    ProductFamily {
        id: "terrestrial-rf".to_string(),
        name: "Terrestrial RF".to_string(),
        color: "#E11D48".to_string(),
        description: "Ground-based RF sensing products for emitter geolocation and GNSS monitoring"
            .to_string(),
        available: false,
        types: vec![
            ProductType::new("rf-geolocation", "RF Geolocation", "Radio frequency emitter geolocation across tactical, operational, and theater scales", "crosshair", geolocation),
            ProductType::new("gnss-monitoring", "GNSS Monitoring", "Global navigation satellite system monitoring and interference detection", "navigation", gnss),
        ],
    }
}
