use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use geomarket_core::config::{parse_cloud_cover, parse_page_size};
use geomarket_core::models::ResultOrder;
use std::path::PathBuf;

/// geomarket - Satellite imagery ordering
#[derive(Parser, Debug)]
#[command(name = "geomarket")]
#[command(about = "Browse the imagery catalog and place orders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show what would be sent without sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Marketplace API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Catalog page size
    #[arg(long, global = true, value_name = "N", value_parser = parse_page_size)]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List product families
    Families,

    /// Show the product types and tiers of a family
    Products(ProductsArgs),

    /// List catalog collections
    Collections,

    /// Search the imagery catalog
    Search(SearchArgs),

    /// Walk through the order wizard
    Order(OrderArgs),

    /// Show the saved order draft and its wizard step
    Draft(DraftArgs),

    /// Submit the saved order draft
    Submit,

    /// List submitted orders or show one
    Orders(OrdersArgs),

    /// Show configuration values and where they come from
    Config,
}

#[derive(Parser, Debug)]
pub struct ProductsArgs {
    /// Family id (e.g. "imagery")
    pub family: String,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Circular area of interest
    #[arg(long, value_name = "LAT,LNG,KM", conflicts_with = "polygon", allow_hyphen_values = true)]
    pub circle: Option<String>,

    /// Polygon area of interest from a GeoJSON file
    #[arg(long, value_name = "FILE")]
    pub polygon: Option<PathBuf>,

    /// First acquisition day (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last acquisition day (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Restrict to a collection; repeat for several
    #[arg(long = "collection", value_name = "ID")]
    pub collections: Vec<String>,

    /// Hide scenes above this cloud cover (percent)
    #[arg(long, value_parser = parse_cloud_cover)]
    pub cloud_cover: Option<f64>,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// Order of the listed scenes
    #[arg(long, value_enum, default_value = "newest")]
    pub sort: SortOrder,
}

/// Result ordering
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortOrder {
    /// Latest acquisition first
    Newest,
    /// Lowest cloud cover first
    Clearest,
}

impl From<SortOrder> for ResultOrder {
    fn from(sort: SortOrder) -> Self {
        match sort {
            SortOrder::Newest => ResultOrder::Newest,
            SortOrder::Clearest => ResultOrder::Clearest,
        }
    }
}

#[derive(Parser, Debug)]
pub struct OrderArgs {
    /// Continue the saved draft instead of starting over
    #[arg(long)]
    pub resume: bool,
}

#[derive(Parser, Debug)]
pub struct DraftArgs {
    /// Discard the saved draft
    #[arg(long)]
    pub reset: bool,
}

#[derive(Parser, Debug)]
pub struct OrdersArgs {
    /// Order id (e.g. ORD-1A2B3C4D); lists all orders when omitted
    pub order_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_flags() {
        let cli = Cli::parse_from([
            "geomarket",
            "search",
            "--circle",
            "-6.2,106.8,25",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
            "--collection",
            "sentinel-2-l2a",
            "--cloud-cover",
            "40%",
            "--json",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.circle.as_deref(), Some("-6.2,106.8,25"));
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(args.collections, vec!["sentinel-2-l2a"]);
                assert_eq!(args.cloud_cover, Some(40.0));
                assert_eq!(args.pages, 1);
                assert_eq!(ResultOrder::from(args.sort), ResultOrder::Newest);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sort_flag() {
        let cli = Cli::parse_from(["geomarket", "search", "--sort", "clearest"]);
        match cli.command {
            Commands::Search(args) => assert_eq!(ResultOrder::from(args.sort), ResultOrder::Clearest),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["geomarket", "search", "--sort", "cheapest"]).is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Cli::try_parse_from(["geomarket", "--page-size", "0", "families"]).is_err());
    }

    #[test]
    fn test_start_requires_end() {
        assert!(Cli::try_parse_from(["geomarket", "search", "--start", "2024-01-01"]).is_err());
    }
}
