//! Sync session configuration.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SyncError;
use crate::mapping::SyncMapping;
use crate::store::{ConfigStore, MAPPINGS_KEY, WORKING_DIR_KEY};

/// Default number of directory levels expanded by tree listings.
pub const DEFAULT_TREE_DEPTH: u32 = 10;

/// Configuration for one sync session.
///
/// Passed explicitly to the engine; sessions never share state.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Directory relative mapping paths resolve against (None = process cwd).
    #[builder(default)]
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Ordered mapping list.
    #[builder(default)]
    #[serde(default)]
    pub mappings: Vec<SyncMapping>,

    /// Directory levels expanded by tree listings.
    #[builder(default = "DEFAULT_TREE_DEPTH")]
    #[serde(default = "default_tree_depth")]
    pub tree_depth: u32,
}

fn default_tree_depth() -> u32 {
    DEFAULT_TREE_DEPTH
}

impl SyncConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(dir)) = &self.working_dir {
            if dir.as_os_str().is_empty() {
                return Err("Working directory cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Create a new config builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Create a config holding the given mappings.
    pub fn new(mappings: Vec<SyncMapping>) -> Self {
        Self {
            working_dir: None,
            mappings,
            tree_depth: DEFAULT_TREE_DEPTH,
        }
    }

    /// Load mappings and working directory from a store.
    ///
    /// Missing keys fall back to defaults.
    pub fn load(store: &dyn ConfigStore) -> Result<Self, SyncError> {
        let mappings = match store.get(MAPPINGS_KEY)? {
            Some(value) => serde_json::from_value(value).map_err(SyncError::store)?,
            None => Vec::new(),
        };
        let working_dir = match store.get(WORKING_DIR_KEY)? {
            Some(Value::String(dir)) if !dir.is_empty() => Some(PathBuf::from(dir)),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(other) => {
                return Err(SyncError::store(format!(
                    "{WORKING_DIR_KEY} must be a string, found {other}"
                )));
            }
        };

        tracing::debug!(mappings = mappings.len(), "loaded sync configuration");

        Ok(Self {
            working_dir,
            mappings,
            tree_depth: DEFAULT_TREE_DEPTH,
        })
    }

    /// Persist mappings and working directory into a store.
    pub fn save(&self, store: &mut dyn ConfigStore) -> Result<(), SyncError> {
        let mappings = serde_json::to_value(&self.mappings).map_err(SyncError::store)?;
        store.set(MAPPINGS_KEY, mappings)?;
        let working_dir = match &self.working_dir {
            Some(dir) => Value::String(dir.to_string_lossy().into_owned()),
            None => Value::Null,
        };
        store.set(WORKING_DIR_KEY, working_dir)
    }

    /// Mappings that batch execution will run.
    pub fn enabled_mappings(&self) -> impl Iterator<Item = &SyncMapping> {
        self.mappings.iter().filter(|m| m.enabled)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_config_builder() {
        let config = SyncConfig::builder()
            .working_dir(Some(PathBuf::from("/work")))
            .tree_depth(3u32)
            .build()
            .unwrap();

        assert_eq!(config.working_dir, Some(PathBuf::from("/work")));
        assert_eq!(config.tree_depth, 3);
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_working_dir() {
        let result = SyncConfig::builder()
            .working_dir(Some(PathBuf::new()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = MemoryStore::new();
        let config = SyncConfig::load(&store).unwrap();
        assert!(config.mappings.is_empty());
        assert!(config.working_dir.is_none());
        assert_eq!(config.tree_depth, DEFAULT_TREE_DEPTH);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut config = SyncConfig::new(vec![
            SyncMapping::new("1", "a.txt", "out/a.txt"),
            SyncMapping::new("2", "dir", "mirror").with_enabled(false),
        ]);
        config.working_dir = Some(PathBuf::from("/work"));
        config.save(&mut store).unwrap();

        let loaded = SyncConfig::load(&store).unwrap();
        assert_eq!(loaded.mappings, config.mappings);
        assert_eq!(loaded.working_dir, Some(PathBuf::from("/work")));
        assert_eq!(loaded.enabled_mappings().count(), 1);
    }

    #[test]
    fn test_load_rejects_malformed_mappings() {
        let mut store = MemoryStore::new();
        store.set(MAPPINGS_KEY, Value::from("not a list")).unwrap();
        assert!(matches!(
            SyncConfig::load(&store),
            Err(SyncError::Store { .. })
        ));
    }
}
