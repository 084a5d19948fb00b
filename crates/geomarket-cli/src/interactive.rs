//! Terminal prompts for the order wizard.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use geomarket_core::models::{
    DayOfWeek, Frequency, LatLng, OrderConfiguration, OrderMode, OrderSchedule, PointOfInterest,
    Priority, ProductCatalog, ProductFamily, Scene, SearchParams,
};
use geomarket_geo::AreaOfInterest;
use geomarket_wizard::{ConfigurationPatch, SceneSelection, SchedulePatch, SearchParamsPatch};
use std::collections::BTreeSet;

const SPECTRAL_BANDS: [&str; 6] = ["Red", "Green", "Blue", "NIR", "SWIR", "Panchromatic"];
const PROCESSING_LEVELS: [&str; 4] = ["L1 - Radiometric", "L2 - Surface reflectance", "L3 - Analysis ready", "Orthorectified"];

/// What the user picked on the products step
pub enum ProductChoice {
    AnyAvailable,
    Specific { type_id: String, tier_id: String },
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
}

/// Pick an orderable family; returns its id
pub fn select_family(catalog: &ProductCatalog) -> Result<String> {
    let families: Vec<&ProductFamily> = catalog.available().collect();
    let labels: Vec<String> = families
        .iter()
        .map(|f| format!("{} - {} ({} products)", f.name, f.description, f.product_count()))
        .collect();

    let idx = Select::new()
        .with_prompt("Product family")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(families[idx].id.clone())
}

pub fn select_order_mode() -> Result<OrderMode> {
    let options = [
        "Historical - order existing archive imagery",
        "Future - task new collections over a date range",
    ];
    let idx = Select::new().with_prompt("Order mode").items(&options).default(0).interact()?;
    Ok(if idx == 0 { OrderMode::Historical } else { OrderMode::Future })
}

pub fn select_products(family: &ProductFamily) -> Result<ProductChoice> {
    let mut labels: Vec<String> = vec!["Any available product".to_string()];
    labels.extend(family.types.iter().map(|t| format!("{} - {}", t.name, t.description)));

    let type_idx = Select::new()
        .with_prompt("Product type")
        .items(&labels)
        .default(0)
        .interact()?;
    if type_idx == 0 {
        return Ok(ProductChoice::AnyAvailable);
    }

    let product_type = &family.types[type_idx - 1];
    let tier_labels: Vec<String> = product_type
        .tiers
        .iter()
        .map(|t| {
            format!("{} ({}, {}, ${:.2}/km²)", t.name, t.gsd_range, t.delivery_time, t.price_per_sq_km)
        })
        .collect();
    let tier_idx = Select::new()
        .with_prompt("Tier")
        .items(&tier_labels)
        .default(0)
        .interact()?;

    Ok(ProductChoice::Specific {
        type_id: product_type.id.clone(),
        tier_id: product_type.tiers[tier_idx].id.clone(),
    })
}

/// Ask for a circle or a GeoJSON polygon until a valid area is given
pub fn prompt_area_of_interest() -> Result<AreaOfInterest> {
    let options = ["Circle (center and radius)", "Polygon (GeoJSON file)"];
    loop {
        let idx = Select::new()
            .with_prompt("Area of interest")
            .items(&options)
            .default(0)
            .interact()?;

        let area = if idx == 0 {
            let lat: f64 = Input::new().with_prompt("Center latitude").interact_text()?;
            let lng: f64 = Input::new().with_prompt("Center longitude").interact_text()?;
            let radius_km: f64 =
                Input::new().with_prompt("Radius (km)").default(10.0).interact_text()?;
            AreaOfInterest::circle(LatLng::new(lat, lng), radius_km)
        } else {
            let path: String = Input::new().with_prompt("GeoJSON file path").interact_text()?;
            match std::fs::read_to_string(&path) {
                Ok(text) => AreaOfInterest::from_geojson_str(&text),
                Err(e) => {
                    eprintln!("Cannot read {}: {}", path, e);
                    continue;
                }
            }
        };

        match area {
            Ok(area) => return Ok(area),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn prompt_date(prompt: &str, current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let text: String = Input::new()
        .with_prompt(format!("{} (YYYY-MM-DD, empty for none)", prompt))
        .with_initial_text(current.map(|d| d.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Use the YYYY-MM-DD format".to_string())
        })
        .interact_text()?;

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}

/// Date range, collections and cloud filter for the catalog search
pub fn prompt_search_params(current: &SearchParams) -> Result<SearchParamsPatch> {
    let start_date = prompt_date("Acquired from", current.start_date)?;
    let end_date = prompt_date("Acquired until", current.end_date)?;

    let collections: String = Input::new()
        .with_prompt("Collections (comma separated, empty for all)")
        .with_initial_text(current.collections.join(","))
        .allow_empty(true)
        .interact_text()?;
    let collections: Vec<String> = collections
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let cloud_cover_max: f64 = Input::new()
        .with_prompt("Maximum cloud cover (%)")
        .default(current.cloud_cover_max)
        .validate_with(|v: &f64| -> Result<(), &str> {
            if (0.0..=100.0).contains(v) {
                Ok(())
            } else {
                Err("Cloud cover must be between 0 and 100")
            }
        })
        .interact_text()?;

    Ok(SearchParamsPatch {
        start_date: Some(start_date),
        end_date: Some(end_date),
        collections: Some(collections),
        cloud_cover_max: Some(cloud_cover_max),
        limit: None,
    })
}

/// Check scenes on or off; returns the scenes whose state changed
pub fn select_scenes(visible: &[&Scene], selection: &SceneSelection) -> Result<Vec<Scene>> {
    let labels: Vec<String> = visible
        .iter()
        .map(|s| {
            format!("{}  {}  cloud {}  [{}]", s.id, s.display_date(), s.display_cloud_cover(), s.collection)
        })
        .collect();
    let checked: Vec<bool> = visible.iter().map(|s| selection.contains(&s.id)).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select scenes (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact()?;

    Ok(visible
        .iter()
        .enumerate()
        .filter(|(i, _)| chosen.contains(i) != checked[*i])
        .map(|(_, scene)| (*scene).clone())
        .collect())
}

pub fn prompt_configuration(
    current: &OrderConfiguration,
    suggested_format: &str,
) -> Result<ConfigurationPatch> {
    let band_defaults: Vec<bool> =
        SPECTRAL_BANDS.iter().map(|b| current.spectral_bands.contains(*b)).collect();
    let bands = MultiSelect::new()
        .with_prompt("Spectral bands")
        .items(&SPECTRAL_BANDS)
        .defaults(&band_defaults)
        .interact()?;
    let spectral_bands: BTreeSet<String> =
        bands.into_iter().map(|i| SPECTRAL_BANDS[i].to_string()).collect();

    let level_default =
        PROCESSING_LEVELS.iter().position(|l| *l == current.processing_level).unwrap_or(0);
    let level_idx = Select::new()
        .with_prompt("Processing level")
        .items(&PROCESSING_LEVELS)
        .default(level_default)
        .interact()?;

    let initial_format = if current.delivery_format.is_empty() {
        suggested_format.to_string()
    } else {
        current.delivery_format.clone()
    };
    let delivery_format: String = Input::new()
        .with_prompt("Delivery format")
        .with_initial_text(initial_format)
        .allow_empty(true)
        .interact_text()?;

    let poi = if confirm("Add a point of interest?", current.poi.is_some())? {
        let latitude: f64 = Input::new().with_prompt("POI latitude").interact_text()?;
        let longitude: f64 = Input::new().with_prompt("POI longitude").interact_text()?;
        let radius_km: f64 = Input::new().with_prompt("POI radius (km)").default(1.0).interact_text()?;
        Some(PointOfInterest { latitude, longitude, radius_km })
    } else {
        None
    };

    let notes: String = Input::new()
        .with_prompt("Notes")
        .with_initial_text(current.notes.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(ConfigurationPatch {
        poi: Some(poi),
        cloud_cover_max: None,
        spectral_bands: Some(spectral_bands),
        delivery_format: Some(delivery_format),
        processing_level: Some(PROCESSING_LEVELS[level_idx].to_string()),
        notes: Some(notes),
    })
}

/// Name, dates, priority and recurrence. Future orders must give both dates.
pub fn prompt_schedule(current: &OrderSchedule, mode: OrderMode) -> Result<SchedulePatch> {
    let order_name: String = Input::new()
        .with_prompt("Order name")
        .with_initial_text(current.order_name.clone())
        .validate_with(|s: &String| -> Result<(), &str> {
            if s.trim().is_empty() {
                Err("An order name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let (start_date, end_date) = loop {
        let start = prompt_date("Collection start", current.start_date)?;
        let end = prompt_date("Collection end", current.end_date)?;
        match (mode, start, end) {
            (OrderMode::Future, None, _) | (OrderMode::Future, _, None) => {
                eprintln!("Future orders need both a start and an end date");
            }
            (_, Some(s), Some(e)) if e < s => eprintln!("The end date is before the start date"),
            _ => break (start, end),
        }
    };
    let expiration_date = prompt_date("Expires on", current.expiration_date)?;

    let priority_labels: Vec<String> = Priority::ALL.iter().map(|p| p.to_string()).collect();
    let priority_default = Priority::ALL.iter().position(|p| *p == current.priority).unwrap_or(1);
    let priority_idx = Select::new()
        .with_prompt("Priority")
        .items(&priority_labels)
        .default(priority_default)
        .interact()?;

    let recurring = confirm("Recurring delivery?", current.recurring)?;
    let (frequency, day_of_week, delivery_window) = if recurring {
        let frequency_labels: Vec<String> = Frequency::ALL.iter().map(|f| f.to_string()).collect();
        let frequency_idx = Select::new()
            .with_prompt("Frequency")
            .items(&frequency_labels)
            .default(1)
            .interact()?;
        let day_labels: Vec<String> = DayOfWeek::ALL.iter().map(|d| d.to_string()).collect();
        let day_idx = Select::new()
            .with_prompt("Delivery day")
            .items(&day_labels)
            .default(0)
            .interact()?;
        let window: String = Input::new()
            .with_prompt("Delivery window (e.g. 08:00-12:00)")
            .with_initial_text(current.delivery_window.clone())
            .allow_empty(true)
            .interact_text()?;
        (Some(Frequency::ALL[frequency_idx]), Some(DayOfWeek::ALL[day_idx]), window)
    } else {
        (None, None, String::new())
    };

    Ok(SchedulePatch {
        order_name: Some(order_name.trim().to_string()),
        start_date: Some(start_date),
        end_date: Some(end_date),
        expiration_date: Some(expiration_date),
        priority: Some(Priority::ALL[priority_idx]),
        recurring: Some(recurring),
        frequency: Some(frequency),
        day_of_week: Some(day_of_week),
        delivery_window: Some(delivery_window),
    })
}
