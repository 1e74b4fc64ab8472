use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSettings {
    /// Key in the synced storage area that holds the command list.
    pub storage_key: String,
    pub export_file_name: String,
    pub close_popup_after_insert: bool,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            storage_key: "commands".to_string(),
            export_file_name: "aid-commands.json".to_string(),
            close_popup_after_insert: true,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<ExtensionSettings> {
        if !self.path.exists() {
            return Ok(ExtensionSettings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading settings file {}", self.path.display()))?;
        let settings: ExtensionSettings =
            serde_json::from_str(&raw).context("failed parsing settings json")?;
        tracing::debug!(path = %self.path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn save(&self, settings: &ExtensionSettings) -> Result<()> {
        let Some(parent) = self.path.parent() else {
            anyhow::bail!("settings path has no parent")
        };
        fs::create_dir_all(parent)?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
