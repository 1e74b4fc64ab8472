use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::{
    error::SnippetResult,
    model::{default_snippets, Snippet},
    settings::ExtensionSettings,
    transfer::{export_snippets, import_snippets},
};

/// Account-scoped key-value area the command list is synced through.
///
/// A `set` replaces the whole value under the key; readers never observe a
/// partially written value.
pub trait KeyValueStorage: Send {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Value>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys in one JSON object file. Writes land in a sibling temp file that
/// is renamed over the target.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading storage file {}", self.path.display()))?;
        serde_json::from_str(&raw).context("failed parsing storage json")
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);

        let Some(parent) = self.path.parent() else {
            anyhow::bail!("storage path has no parent")
        };
        fs::create_dir_all(parent)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&all)?)
            .with_context(|| format!("failed writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed replacing {}", self.path.display()))?;
        Ok(())
    }
}

pub struct SnippetStore<S: KeyValueStorage> {
    storage: S,
    settings: ExtensionSettings,
}

impl<S: KeyValueStorage> SnippetStore<S> {
    pub fn new(storage: S, settings: &ExtensionSettings) -> Self {
        Self {
            storage,
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &ExtensionSettings {
        &self.settings
    }

    fn key(&self) -> &str {
        &self.settings.storage_key
    }

    /// `None` when the list has never been written.
    pub fn load(&self) -> Result<Option<Vec<Snippet>>> {
        let value = match self.storage.get(self.key())? {
            None | Some(Value::Null) => {
                tracing::debug!(key = %self.key(), "no stored commands");
                return Ok(None);
            }
            Some(value) => value,
        };
        let snippets: Vec<Snippet> = serde_json::from_value(value)
            .with_context(|| format!("stored value under {:?} is not a command list", self.key()))?;
        tracing::debug!(key = %self.key(), count = snippets.len(), "commands loaded");
        Ok(Some(snippets))
    }

    pub fn load_or_default(&self) -> Result<Vec<Snippet>> {
        Ok(self.load()?.unwrap_or_else(default_snippets))
    }

    pub fn save(&mut self, snippets: &[Snippet]) -> Result<()> {
        let value = serde_json::to_value(snippets)?;
        self.storage.set(&self.settings.storage_key, value)?;
        tracing::info!(key = %self.key(), count = snippets.len(), "commands saved");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<Vec<Snippet>> {
        let defaults = default_snippets();
        self.save(&defaults)?;
        tracing::info!("commands reset to defaults");
        Ok(defaults)
    }

    /// Parses an import payload. Nothing is persisted; the caller decides
    /// whether to save the result.
    pub fn import_from(&self, raw: &str) -> SnippetResult<Vec<Snippet>> {
        import_snippets(raw)
    }

    pub fn export_to(&self) -> Result<String> {
        export_snippets(&self.load_or_default()?)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnippetError;
    use pretty_assertions::assert_eq;

    fn memory_store() -> SnippetStore<MemoryStorage> {
        SnippetStore::new(MemoryStorage::default(), &ExtensionSettings::default())
    }

    fn sample() -> Vec<Snippet> {
        vec![
            Snippet::new("Team", "/team ", "pick a team"),
            Snippet::new("Swap", "/swap", ""),
            Snippet::new("Team", "/team ", "pick a team"),
        ]
    }

    #[test]
    fn absent_before_first_save() {
        let store = memory_store();
        assert_eq!(store.load().expect("load"), None);
        assert_eq!(store.load_or_default().expect("load"), default_snippets());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = memory_store();
        store.save(&sample()).expect("save");
        assert_eq!(store.load().expect("load"), Some(sample()));
    }

    #[test]
    fn save_replaces_whole_list() {
        let mut store = memory_store();
        store.save(&sample()).expect("save");
        store.save(&sample()[1..2]).expect("save");
        assert_eq!(
            store.load().expect("load"),
            Some(vec![Snippet::new("Swap", "/swap", "")])
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut store = memory_store();
        store.save(&sample()).expect("save");
        let reset = store.reset().expect("reset");
        assert_eq!(reset, default_snippets());
        assert_eq!(store.load().expect("load"), Some(default_snippets()));
    }

    #[test]
    fn uses_configured_key() {
        let settings = ExtensionSettings {
            storage_key: "snippets".to_string(),
            ..ExtensionSettings::default()
        };
        let mut store = SnippetStore::new(MemoryStorage::default(), &settings);
        store.save(&sample()).expect("save");
        assert!(store.storage().get("snippets").expect("get").is_some());
        assert!(store.storage().get("commands").expect("get").is_none());
    }

    #[test]
    fn corrupt_stored_value_is_an_error() {
        let mut storage = MemoryStorage::default();
        storage
            .set("commands", serde_json::json!({"label": "A"}))
            .expect("set");
        let store = SnippetStore::new(storage, &ExtensionSettings::default());
        assert!(store.load().is_err());
    }

    #[test]
    fn failed_import_leaves_store_untouched() {
        let mut store = memory_store();
        store.save(&sample()).expect("save");
        let err = store.import_from(r#"{"label":"A"}"#).unwrap_err();
        assert!(matches!(err, SnippetError::InvalidFormat(_)));
        assert_eq!(store.load().expect("load"), Some(sample()));
    }

    #[test]
    fn export_then_import_preserves_order() {
        let mut store = memory_store();
        store.save(&sample()).expect("save");
        let exported = store.export_to().expect("export");
        let imported = store.import_from(&exported).expect("import");
        assert_eq!(
            imported,
            vec![
                Snippet::new("Team", "/team", "pick a team"),
                Snippet::new("Swap", "/swap", ""),
                Snippet::new("Team", "/team", "pick a team"),
            ]
        );
    }

    #[test]
    fn file_storage_round_trips_and_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sync").join("storage.json");

        let mut storage = JsonFileStorage::new(path.clone());
        storage
            .set("theme", Value::String("dark".to_string()))
            .expect("set");
        let mut store = SnippetStore::new(storage, &ExtensionSettings::default());
        store.save(&sample()).expect("save");

        let reopened = SnippetStore::new(JsonFileStorage::new(path.clone()), &ExtensionSettings::default());
        assert_eq!(reopened.load().expect("load"), Some(sample()));
        assert_eq!(
            reopened.storage().get("theme").expect("get"),
            Some(Value::String("dark".to_string()))
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_storage_missing_file_is_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnippetStore::new(
            JsonFileStorage::new(dir.path().join("storage.json")),
            &ExtensionSettings::default(),
        );
        assert_eq!(store.load().expect("load"), None);
    }
}
