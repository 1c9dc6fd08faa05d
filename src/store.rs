//! Key-value persistence for the tracker state

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A store of named JSON values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&Value>;
    fn put(&mut self, key: &str, value: Value);

    /// Load the value stored under `key`, or `default` when nothing is stored
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> anyhow::Result<T> {
        match self.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("Invalid value stored under '{key}'")),
            None => Ok(default),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize value for '{key}'"))?;
        self.put(key, value);
        Ok(())
    }
}

/// In-memory store
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// Store backed by a single JSON object on disk. Changes are only written
/// by [`JsonFileStore::flush`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let values = match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse data file {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No data file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read data file {}", path.display()))
            }
        };
        Ok(JsonFileStore {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to disk, replacing the previous file
    pub fn flush(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write data file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace data file {}", self.path.display()))?;
        log::debug!("Saved data file {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_default_for_missing_key() {
        let store = MemoryStore::default();
        let values: Vec<u32> = store.load("missing", vec![7]).unwrap();
        assert_eq!(values, vec![7]);
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::default();
        store.save("year", &"2024-25").unwrap();
        let year: String = store.load("year", String::new()).unwrap();
        assert_eq!(year, "2024-25");
    }

    #[test]
    fn load_reports_mismatched_shape() {
        let mut store = MemoryStore::default();
        store.put("numbers", Value::String("oops".to_string()));
        let err = store.load::<Vec<u32>>("numbers", vec![]).unwrap_err();
        assert!(err.to_string().contains("numbers"));
    }

    #[test]
    fn file_store_persists_on_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("k").is_none());
        store.save("k", &vec!["a", "b"]).unwrap();
        assert!(!path.exists());
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let values: Vec<String> = reopened.load("k", vec![]).unwrap();
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse data file"));
    }
}
