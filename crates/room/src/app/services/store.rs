use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::atomic_io::write_text_atomic;

pub(crate) const STORE_FILE_NAME: &str = "local_store.json";
const STORE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read local store '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode local store '{path}' at {field}: {source}")]
    Decode {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("local store '{path}' has version {found}, expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("failed to encode local store: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write local store '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Small persistent key/value storage for flags that outlive a run.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

/// JSON file store; the file is reread on every access and replaced atomically on write.
#[derive(Debug, Clone)]
pub(crate) struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORE_FILE_NAME))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreFile {
                    version: STORE_VERSION,
                    entries: BTreeMap::new(),
                });
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let file = parse_store_json(&self.path, &raw)?;
        if file.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: file.version,
                expected: STORE_VERSION,
            });
        }
        Ok(file)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_file()?.entries.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut file = match self.read_file() {
            Ok(file) => file,
            Err(error @ (StoreError::Decode { .. } | StoreError::UnsupportedVersion { .. })) => {
                warn!(error = %error, "local_store_reset");
                StoreFile {
                    version: STORE_VERSION,
                    entries: BTreeMap::new(),
                }
            }
            Err(error) => return Err(error),
        };
        file.entries.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&file).map_err(StoreError::Encode)?;
        write_text_atomic(&self.path, &json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_store_json(path: &Path, raw: &str) -> Result<StoreFile, StoreError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, StoreFile>(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        StoreError::Decode {
            path: path.to_path_buf(),
            field,
            source: error.into_inner(),
        }
    })
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Loose truthiness for stored flags: null, false, 0 and "" read as unset.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().expect("temp dir");
        let store = LocalStore::in_dir(temp.path());
        assert!(store.get("visit").expect("get").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn set_persists_across_instances() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = LocalStore::in_dir(&temp.path().join("data"));
        store.set("visit", json!(true)).expect("set");

        let reopened = LocalStore::in_dir(&temp.path().join("data"));
        assert_eq!(reopened.get("visit").expect("get"), Some(json!(true)));
    }

    #[test]
    fn set_keeps_unrelated_entries() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = LocalStore::in_dir(temp.path());
        store.set("theme", json!("dark")).expect("set theme");
        store.set("visit", json!(true)).expect("set visit");

        assert_eq!(store.get("theme").expect("get"), Some(json!("dark")));
    }

    #[test]
    fn decode_error_names_offending_field() {
        let temp = TempDir::new().expect("temp dir");
        let store = LocalStore::in_dir(temp.path());
        fs::write(store.path(), r#"{"version":"one","entries":{}}"#).expect("write");

        match store.get("visit") {
            Err(StoreError::Decode { field, .. }) => assert_eq!(field, "version"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_version_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let store = LocalStore::in_dir(temp.path());
        fs::write(store.path(), r#"{"version":7,"entries":{}}"#).expect("write");

        assert!(matches!(
            store.get("visit"),
            Err(StoreError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn set_replaces_corrupt_file() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = LocalStore::in_dir(temp.path());
        fs::write(store.path(), "{ not json").expect("write");

        store.set("visit", json!(true)).expect("set");
        assert_eq!(store.get("visit").expect("get"), Some(json!(true)));
    }

    #[test]
    fn set_replaces_unknown_version() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = LocalStore::in_dir(temp.path());
        fs::write(store.path(), r#"{"version":7,"entries":{"visit":false}}"#).expect("write");

        store.set("visit", json!(true)).expect("set");
        assert_eq!(store.get("visit").expect("get"), Some(json!(true)));
    }

    #[test]
    fn truthiness_matches_loose_flag_semantics() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }
}
