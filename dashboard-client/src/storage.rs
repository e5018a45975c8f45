//! Durable key-value storage
//!
//! Everything the access layer persists (session token, cached user info,
//! mock entity stores, pending captcha codes) goes through [`KeyValueStore`].
//! Values are JSON strings.

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use crate::{ClientError, ClientResult};

/// Bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Cached profile of the signed-in user
pub const USER_INFO_KEY: &str = "user_info";
/// Mock user store
pub const MOCK_USERS_KEY: &str = "mock_users";
/// Mock department store
pub const MOCK_DEPARTMENTS_KEY: &str = "mock_departments";

/// Key holding the expected code of a pending captcha
pub fn captcha_key(token: &str) -> String {
    format!("captcha_{token}")
}

/// Synchronous string key-value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// JSON helpers over any [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode a JSON value. Undecodable values read as absent.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable stored value");
                Ok(None)
            }
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ClientResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// The decoded map is cached in memory. Reads only stat the file and reload
/// it when its modification time or length changed, so writes made through
/// another handle on the same path stay visible. Every write rewrites the
/// whole file through a temporary sibling and a rename.
///
/// All file access is blocking `std::fs`. The file holds a handful of small
/// entries, so it is used directly from async code.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: Mutex<Cached>,
}

/// Modification time and length of the backing file
type Stamp = (SystemTime, u64);

#[derive(Debug, Default)]
struct Cached {
    stamp: Option<Stamp>,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(Cached::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn stamp(&self) -> ClientResult<Option<Stamp>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some((meta.modified()?, meta.len()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> ClientResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ClientError::Storage(format!("corrupt store {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Lock the cache, reloading it if the file changed underneath
    fn fresh(&self) -> ClientResult<MutexGuard<'_, Cached>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ClientError::Storage("store lock poisoned".into()))?;
        let stamp = self.stamp()?;
        if stamp != cache.stamp {
            tracing::debug!(path = %self.path.display(), "Reloading store file");
            cache.entries = self.load()?;
            cache.stamp = stamp;
        }
        Ok(cache)
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> ClientResult<()> {
        let mut cache = self.fresh()?;
        let mut entries = cache.entries.clone();
        f(&mut entries);
        self.save(&entries)?;
        cache.entries = entries;
        cache.stamp = self.stamp()?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.fresh()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_none());

        store.set(AUTH_TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        store.set_json("numbers", &vec![1, 2, 3]).unwrap();
        let back: Vec<u32> = store.get_json("numbers").unwrap().unwrap();
        assert_eq!(back, vec![1, 2, 3]);

        store.set("broken", "{not json").unwrap();
        let broken: Option<Vec<u32>> = store.get_json("broken").unwrap();
        assert!(broken.is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let store = FileStore::new(&path);
        assert!(!store.exists());
        store.set(&captcha_key("t1"), "AB12").unwrap();
        store.set(AUTH_TOKEN_KEY, "token-1").unwrap();
        assert!(store.exists());

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get(&captcha_key("t1")).unwrap().as_deref(),
            Some("AB12")
        );

        reopened.remove(AUTH_TOKEN_KEY).unwrap();
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("x"), Err(ClientError::Storage(_))));
    }

    #[test]
    fn test_file_store_reads_from_cache_until_file_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let store = FileStore::new(&path);
        store.set(AUTH_TOKEN_KEY, "token-1").unwrap();

        // Garble the file but keep its length and modification time
        let meta = fs::metadata(&path).unwrap();
        fs::write(&path, "#".repeat(meta.len() as usize)).unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(meta.modified().unwrap())
            .unwrap();

        assert_eq!(
            store.get(AUTH_TOKEN_KEY).unwrap().as_deref(),
            Some("token-1")
        );
        assert!(matches!(
            FileStore::new(&path).get(AUTH_TOKEN_KEY),
            Err(ClientError::Storage(_))
        ));
    }
}
