//! Saved order draft, kept between CLI invocations.

use anyhow::{Context, Result};
use geomarket_wizard::OrderDraft;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config_loader::WORKSPACE_DIR;

pub struct DraftFile {
    path: PathBuf,
}

impl DraftFile {
    pub fn in_workspace(workspace_root: &Path) -> Self {
        Self { path: workspace_root.join(WORKSPACE_DIR).join("draft.json") }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved draft, or an empty one when nothing was saved
    pub fn load(&self) -> Result<OrderDraft> {
        if !self.path.exists() {
            return Ok(OrderDraft::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let draft = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(draft)
    }

    pub fn save(&self, draft: &OrderDraft) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(draft)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
