//! Durable slot for the geocode cache.
//!
//! The whole cache is one JSON document stored under the fixed slot name
//! [`CACHE_SLOT`]. It is read once at startup and rewritten after every new
//! successful resolution.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use jobmap_core::LatLng;
use serde::{Deserialize, Serialize};

use crate::error::CacheStoreError;

/// Fixed name of the durable cache slot.
pub const CACHE_SLOT: &str = "geocodeCache";

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    saved_at: DateTime<Utc>,
    entries: BTreeMap<String, LatLng>,
}

/// Where the geocode cache is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStore {
    /// A JSON file; see [`CacheStore::file_in`].
    File(PathBuf),
    /// No persistence: the cache lives for the session only.
    Disabled,
}

impl CacheStore {
    /// The slot file inside `dir`: `{dir}/geocodeCache.json`.
    #[must_use]
    pub fn file_in(dir: &Path) -> Self {
        Self::File(dir.join(format!("{CACHE_SLOT}.json")))
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Disabled => None,
        }
    }

    /// Reads the stored entries. A missing file is an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheStoreError::Io`] if the file exists but cannot be read,
    /// or [`CacheStoreError::Corrupt`] if it is not a cache document.
    pub fn load(&self) -> Result<HashMap<String, LatLng>, CacheStoreError> {
        let Self::File(path) = self else {
            return Ok(HashMap::new());
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(CacheStoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let document: CacheDocument =
            serde_json::from_str(&content).map_err(|e| CacheStoreError::Corrupt {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(document.entries.into_iter().collect())
    }

    /// Writes `entries` to the slot, replacing its previous contents.
    ///
    /// The document is written to a sibling temp file and renamed into place
    /// so a crash mid-write never leaves a truncated cache behind.
    ///
    /// # Errors
    ///
    /// Returns [`CacheStoreError::Io`] if the directory or file cannot be
    /// written, or [`CacheStoreError::Serialize`] if encoding fails.
    pub async fn save(&self, entries: &HashMap<String, LatLng>) -> Result<(), CacheStoreError> {
        let Self::File(path) = self else {
            return Ok(());
        };

        let document = CacheDocument {
            saved_at: Utc::now(),
            entries: entries.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        };
        let body = serde_json::to_vec_pretty(&document).map_err(CacheStoreError::Serialize)?;

        let io_err = |source: std::io::Error| CacheStoreError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (PathBuf, CacheStore) {
        let dir = std::env::temp_dir().join(format!("jobmap-store-{}", uuid::Uuid::new_v4()));
        let store = CacheStore::file_in(&dir);
        (dir, store)
    }

    #[test]
    fn file_in_uses_fixed_slot_name() {
        let store = CacheStore::file_in(Path::new("/tmp/cache"));
        assert_eq!(
            store.path(),
            Some(Path::new("/tmp/cache/geocodeCache.json"))
        );
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn disabled_store_loads_empty() {
        assert!(CacheStore::Disabled.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_preserves_entries() {
        let (dir, store) = temp_store();
        let mut entries = HashMap::new();
        entries.insert("Phoenix, Arizona".to_owned(), LatLng::new(33.4484, -112.074));
        entries.insert("Austin, Texas".to_owned(), LatLng::new(30.2672, -97.7431));

        store.save(&entries).await.unwrap();
        assert_eq!(store.load().unwrap(), entries);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let (dir, store) = temp_store();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path().unwrap(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, CacheStoreError::Corrupt { .. }), "got: {err:?}");

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn disabled_store_save_is_noop() {
        CacheStore::Disabled.save(&HashMap::new()).await.unwrap();
    }
}
