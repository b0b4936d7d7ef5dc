use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::theme::domain::preference_store::{KeyValueStore, StoreError};

/// Key-value store backed by a single pretty-printed JSON object on disk.
///
/// Unrelated keys already in the file are preserved across writes.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_object(&self, object: &Map<String, Value>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(object).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.into(),
        })?;

        // Write to a sibling temp file, then rename so readers never see a torn file
        let temp_path = self.path.with_extension("part");
        fs::write(&temp_path, json).map_err(write_err)?;
        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let object = self.read_object()?;
        Ok(object
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut object = match self.read_object() {
            Ok(object) => object,
            Err(StoreError::Corrupt { path, source }) => {
                log::warn!("Overwriting corrupt preferences file {}: {source}", path.display());
                Map::new()
            }
            Err(e) => return Err(e),
        };
        object.insert(key.to_string(), Value::String(value.to_string()));
        self.write_object(&object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_file_returns_none() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("prefs.json"));
        assert_eq!(store.get("themeMode").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("prefs.json");
        let mut store = JsonFileStore::new(&path);

        store.set("themeMode", "dark").unwrap();

        assert!(path.exists());
        assert_eq!(store.get("themeMode").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(tmp.path().join("prefs.json"));

        store.set("themeMode", "dark").unwrap();
        store.set("themeMode", "light").unwrap();

        assert_eq!(store.get("themeMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_set_preserves_unrelated_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, r#"{ "fontScale": 1.25, "language": "en" }"#).unwrap();
        let mut store = JsonFileStore::new(&path);

        store.set("themeMode", "system").unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["language"], "en");
        assert_eq!(written["fontScale"], 1.25);
        assert_eq!(written["themeMode"], "system");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        let mut store = JsonFileStore::new(&path);

        store.set("themeMode", "dark").unwrap();

        assert!(!path.with_extension("part").exists());
    }

    #[test]
    fn test_get_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);

        assert!(matches!(
            store.get("themeMode"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_set_replaces_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        store.set("themeMode", "light").unwrap();

        assert_eq!(store.get("themeMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_non_string_value_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, r#"{ "themeMode": 3 }"#).unwrap();
        let store = JsonFileStore::new(&path);

        assert_eq!(store.get("themeMode").unwrap(), None);
    }
}
