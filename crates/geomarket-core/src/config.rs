use crate::error::{MarketError, Result};
use crate::models::search::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default marketplace API root
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the marketplace client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_url: ConfigValue<String>,
    pub page_size: ConfigValue<usize>,
    pub cloud_cover_max: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_url: ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default),
            page_size: ConfigValue::new(DEFAULT_PAGE_SIZE, ConfigSource::Default),
            cloud_cover_max: ConfigValue::new(30.0, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| MarketError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| MarketError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_url) = file_config.api_url {
            self.api_url.update(validate_api_url(&api_url)?, ConfigSource::File);
        }

        if let Some(page_size) = file_config.page_size {
            self.page_size.update(validate_page_size(page_size)?, ConfigSource::File);
        }

        if let Some(cloud_cover_max) = file_config.cloud_cover_max {
            self.cloud_cover_max
                .update(validate_cloud_cover(cloud_cover_max)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOMARKET_API_URL
        if let Ok(api_url) = env::var("GEOMARKET_API_URL") {
            match validate_api_url(&api_url) {
                Ok(url) => self.api_url.update(url, ConfigSource::Environment),
                Err(_) => tracing::warn!("Ignoring empty GEOMARKET_API_URL"),
            }
        }

        // GEOMARKET_PAGE_SIZE
        if let Ok(size_str) = env::var("GEOMARKET_PAGE_SIZE") {
            match parse_page_size(&size_str) {
                Ok(size) => self.page_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOMARKET_PAGE_SIZE value '{}': expected a positive integer",
                    size_str
                ),
            }
        }

        // GEOMARKET_CLOUD_COVER_MAX
        if let Ok(cc_str) = env::var("GEOMARKET_CLOUD_COVER_MAX") {
            match parse_cloud_cover(&cc_str) {
                Ok(cc) => self.cloud_cover_max.update(cc, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOMARKET_CLOUD_COVER_MAX value '{}': expected a percentage between 0 and 100",
                    cc_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.api_url.update(api_url, ConfigSource::Cli);
        }

        if let Some(page_size) = overrides.page_size {
            self.page_size.update(page_size, ConfigSource::Cli);
        }

        if let Some(cloud_cover_max) = overrides.cloud_cover_max {
            self.cloud_cover_max.update(cloud_cover_max, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("api_url".to_string(), (self.api_url.value.clone(), self.api_url.source));

        map.insert(
            "page_size".to_string(),
            (self.page_size.value.to_string(), self.page_size.source),
        );

        map.insert(
            "cloud_cover_max".to_string(),
            (format!("{}%", self.cloud_cover_max.value), self.cloud_cover_max.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_url: Option<String>,
    page_size: Option<usize>,
    cloud_cover_max: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_url: Option<String>,
    pub page_size: Option<usize>,
    pub cloud_cover_max: Option<f64>,
}

/// Parse a page size from string
pub fn parse_page_size(s: &str) -> Result<usize> {
    let size = s.trim().parse::<usize>().map_err(|_| MarketError::ConfigInvalid {
        key: "page_size".to_string(),
        reason: format!("Invalid page size: {}. Use a positive integer", s),
    })?;
    validate_page_size(size)
}

/// Parse a cloud cover percentage from string
pub fn parse_cloud_cover(s: &str) -> Result<f64> {
    let cc = s.trim().trim_end_matches('%').parse::<f64>().map_err(|_| {
        MarketError::ConfigInvalid {
            key: "cloud_cover_max".to_string(),
            reason: format!("Invalid cloud cover: {}. Use a percentage between 0 and 100", s),
        }
    })?;
    validate_cloud_cover(cc)
}

fn validate_api_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(MarketError::ConfigMissing { key: "api_url".to_string() });
    }
    Ok(url.to_string())
}

fn validate_page_size(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(MarketError::ConfigInvalid {
            key: "page_size".to_string(),
            reason: "Page size must be at least 1".to_string(),
        });
    }
    Ok(size)
}

fn validate_cloud_cover(cc: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&cc) {
        return Err(MarketError::ConfigInvalid {
            key: "cloud_cover_max".to_string(),
            reason: format!("Cloud cover {} is outside 0-100", cc),
        });
    }
    Ok(cc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.page_size.value, 20);
        assert_eq!(config.cloud_cover_max.value, 30.0);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_blank_api_url_in_file_is_missing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"api_url = "  ""#).unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, MarketError::ConfigMissing { ref key } if key == "api_url"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_url = "https://market.example.test/api"
page_size = 50
cloud_cover_max = 15.0
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.api_url.value, "https://market.example.test/api");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.page_size.value, 50);
        assert_eq!(config.cloud_cover_max.value, 15.0);
    }

    #[test]
    fn test_file_rejects_zero_page_size() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(MarketError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            api_url: Some("http://127.0.0.1:9000/api".to_string()),
            page_size: None,
            cloud_cover_max: None,
        });

        assert_eq!(config.api_url.value, "http://127.0.0.1:9000/api");
        assert_eq!(config.api_url.source, ConfigSource::Cli);
        assert_eq!(config.page_size.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_page_size("25").unwrap(), 25);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("many").is_err());
        assert_eq!(parse_cloud_cover("40%").unwrap(), 40.0);
        assert!(parse_cloud_cover("140").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["page_size"], ("20".to_string(), ConfigSource::Default));
    }
}
