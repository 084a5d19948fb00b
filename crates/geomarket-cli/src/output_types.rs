use geomarket_core::config::LayeredConfig;
use geomarket_core::models::{OrderRequest, OrderResponse, ProductFamily, ProductType, Scene};
use geomarket_wizard::review::{estimated_cost, suggested_data_format};
use geomarket_wizard::OrderDraft;
use serde::Serialize;
use tabled::Tabled;

/// Row of the families table
#[derive(Debug, Serialize, Tabled)]
pub struct FamilyRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Products")]
    pub products: usize,
    #[tabled(rename = "Available")]
    pub available: bool,
}

impl From<&ProductFamily> for FamilyRow {
    fn from(family: &ProductFamily) -> Self {
        Self {
            id: family.id.clone(),
            name: family.name.clone(),
            products: family.product_count(),
            available: family.available,
        }
    }
}

/// One tier of one product type
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    #[tabled(rename = "Type")]
    pub type_id: String,
    #[tabled(rename = "Tier")]
    pub tier_id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "GSD")]
    pub gsd_range: String,
    #[tabled(rename = "Delivery")]
    pub delivery_time: String,
    #[tabled(rename = "$/km²")]
    pub price_per_sq_km: f64,
}

impl ProductRow {
    pub fn rows(product_type: &ProductType) -> impl Iterator<Item = ProductRow> + '_ {
        product_type.tiers.iter().map(|tier| ProductRow {
            type_id: product_type.id.clone(),
            tier_id: tier.id.clone(),
            name: tier.name.clone(),
            gsd_range: tier.gsd_range.clone(),
            delivery_time: tier.delivery_time.clone(),
            price_per_sq_km: tier.price_per_sq_km,
        })
    }
}

/// Row of a scene listing
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct SceneRow {
    #[tabled(rename = "Scene")]
    pub id: String,
    #[tabled(rename = "Collection")]
    pub collection: String,
    #[tabled(rename = "Acquired")]
    pub acquired: String,
    #[tabled(rename = "Cloud %")]
    pub cloud_cover: String,
    #[tabled(skip)]
    pub preview: String,
}

impl From<&Scene> for SceneRow {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id.clone(),
            collection: scene.collection.clone(),
            acquired: scene.display_date(),
            cloud_cover: scene.display_cloud_cover(),
            preview: scene.preview_href_or_placeholder().to_string(),
        }
    }
}

/// Output for the search command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    pub area: Option<String>,
    pub bbox: Option<[f64; 4]>,
    pub datetime: Option<String>,
    pub number_matched: usize,
    pub loaded: usize,
    pub hidden_by_cloud_filter: usize,
    pub scenes: Vec<SceneRow>,
}

/// Row of the orders table
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[tabled(rename = "Order")]
    pub order_id: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Family")]
    pub family_id: String,
    #[tabled(rename = "Scenes")]
    pub scenes: usize,
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<&OrderResponse> for OrderRow {
    fn from(order: &OrderResponse) -> Self {
        Self {
            order_id: order.order_id.clone(),
            status: order.status.clone(),
            name: order.schedule.order_name.clone(),
            family_id: order.family_id.clone(),
            scenes: order.selected_scene_ids.len(),
            created_at: order.created_at.clone(),
        }
    }
}

/// Output for the draft command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStatusOutput {
    pub step: u8,
    pub step_label: &'static str,
    pub family: Option<String>,
    pub order_mode: Option<String>,
    pub any_available: bool,
    pub product_type: Option<String>,
    pub tier: Option<String>,
    pub area_of_interest: Option<String>,
    pub loaded_results: usize,
    pub total_matched: usize,
    pub selected_scenes: Vec<String>,
    pub order_name: String,
    pub data_format: &'static str,
    pub estimated_cost: Option<f64>,
}

impl From<&OrderDraft> for DraftStatusOutput {
    fn from(draft: &OrderDraft) -> Self {
        let step = draft.step();
        Self {
            step: step.number(),
            step_label: step.label(),
            family: draft.family().map(|f| f.name.clone()),
            order_mode: draft.order_mode().map(|m| m.to_string()),
            any_available: draft.any_available(),
            product_type: draft.product_type().map(|t| t.name.clone()),
            tier: draft.tier().map(|t| t.name.clone()),
            area_of_interest: draft.area_of_interest().map(|a| a.describe()),
            loaded_results: draft.results().len(),
            total_matched: draft.total_matched(),
            selected_scenes: draft.selected_scenes().ids(),
            order_name: draft.schedule().order_name.clone(),
            data_format: suggested_data_format(draft.selected_scenes()),
            estimated_cost: estimated_cost(draft),
        }
    }
}

/// Output for the submit command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutput {
    pub order: OrderResponse,
}

/// Output for dry-run submissions
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPreview {
    pub endpoint: String,
    pub request: OrderRequest,
}

/// Output for the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigRow {
    /// Rows sorted by key
    pub fn rows(config: &LayeredConfig) -> Vec<ConfigRow> {
        let mut rows: Vec<ConfigRow> = config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows
    }
}
