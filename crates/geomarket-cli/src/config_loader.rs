//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geomarket_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Directory holding config.toml and the saved draft
pub const WORKSPACE_DIR: &str = ".geomarket";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(workspace_root: &Path, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let config_path = workspace_root.join(WORKSPACE_DIR).join("config.toml");

    let mut config = LayeredConfig::with_defaults();
    if config_path.exists() {
        config = config
            .load_from_file(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// Nearest ancestor holding a .geomarket directory, else the current directory
pub fn find_workspace_root() -> Result<PathBuf> {
    let start = std::env::current_dir().context("Failed to read the current directory")?;
    let mut current = start.clone();
    loop {
        if current.join(WORKSPACE_DIR).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Ok(start);
        }
    }
}
