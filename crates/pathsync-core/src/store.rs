//! Key-value configuration store handles.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::SyncError;

/// Key holding the persisted mapping list.
pub const MAPPINGS_KEY: &str = "syncMappings";

/// Key holding the working directory.
pub const WORKING_DIR_KEY: &str = "workingDirectory";

/// A key-value store that supplies and persists configuration.
pub trait ConfigStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, SyncError>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), SyncError>;
}

/// In-process store, useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SyncError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SyncError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
///
/// The whole document is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text).map_err(SyncError::store)? {
                Value::Object(map) => map,
                _ => {
                    return Err(SyncError::store(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )));
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(SyncError::io(&path, e)),
        };

        Ok(Self { path, document })
    }

    /// Default location: `<config dir>/pathsync/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pathsync")
            .join("config.json")
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(&self.document).map_err(SyncError::store)?;
        fs::write(&self.path, text).map_err(|e| SyncError::io(&self.path, e))
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SyncError> {
        Ok(self.document.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SyncError> {
        self.document.insert(key.to_string(), value);
        self.flush()
    }
}
