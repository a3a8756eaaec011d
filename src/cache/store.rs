//! Filesystem-backed read-through cache

use crate::cache::key::{url_digest, CacheKey};
use crate::cache::{CacheError, CacheResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Durable key → JSON document mapping
///
/// Lookups read through: an existing entry is returned as stored, a missing
/// entry is computed, written, then returned. A failed computation writes
/// nothing. Entries are written to a temporary file in the target directory
/// and renamed into place, so readers never observe a partial document.
///
/// There is no invalidation. A stale entry stays until its file is deleted.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Creates a store whose URL-keyed entries live under `dir`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path backing `key`
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        match key {
            CacheKey::Fixed(path) => path.clone(),
            CacheKey::Url(url) => self.dir.join(format!("{}.json", url_digest(url))),
        }
    }

    /// Returns true if an entry exists for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    /// Reads the entry for `key` without computing anything
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - The cached document
    /// * `Ok(None)` - No entry for this key
    /// * `Err(CacheError)` - The file exists but could not be read or parsed
    pub fn load<T: DeserializeOwned>(&self, key: &CacheKey) -> CacheResult<Option<T>> {
        let path = self.path_for(key);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let value = serde_json::from_str(&content).map_err(|source| CacheError::Malformed {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Cache hit: {}", path.display());
        Ok(Some(value))
    }

    /// Writes `value` as the entry for `key`, replacing any previous file
    ///
    /// Object keys are sorted and the document is indented, so the same value
    /// always produces the same bytes.
    pub fn store<T: Serialize>(&self, key: &CacheKey, value: &T) -> CacheResult<PathBuf> {
        let path = self.path_for(key);
        let io_error = |source: std::io::Error| CacheError::Io {
            path: path.display().to_string(),
            source,
        };

        let document = sort_keys(serde_json::to_value(value)?);
        let mut text = serde_json::to_string_pretty(&document)?;
        text.push('\n');

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(io_error)?;

        let mut staged = NamedTempFile::new_in(parent).map_err(io_error)?;
        staged.write_all(text.as_bytes()).map_err(io_error)?;
        staged.flush().map_err(io_error)?;
        staged.persist(&path).map_err(|e| io_error(e.error))?;

        tracing::debug!("Cache write: {}", path.display());
        Ok(path)
    }

    /// Returns the cached entry for `key`, computing and persisting it on a miss
    ///
    /// `compute` is not invoked when an entry already exists. When it fails,
    /// its error is returned and no entry is written.
    pub fn get_or_compute<T, E, F>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(cached) = self.load(key)? {
            return Ok(cached);
        }

        tracing::debug!("Cache miss: {}", self.path_for(key).display());
        let value = compute()?;
        self.store(key, &value)?;
        Ok(value)
    }

    /// Async twin of [`CacheStore::get_or_compute`] for computations that fetch
    pub async fn get_or_compute_async<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.load(key)? {
            return Ok(cached);
        }

        tracing::debug!("Cache miss: {}", self.path_for(key).display());
        let value = compute().await?;
        self.store(key, &value)?;
        Ok(value)
    }
}

/// Rebuilds every object in `value` with its keys in ascending order
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BestsellerError;
    use serde::Deserialize;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        zebra: u32,
        apple: String,
    }

    fn doc() -> Doc {
        Doc {
            zebra: 7,
            apple: "red".to_string(),
        }
    }

    fn store() -> (TempDir, CacheStore) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("pages"));
        (dir, store)
    }

    #[test]
    fn test_second_call_does_not_compute() {
        let (_dir, store) = store();
        let key = CacheKey::url("https://www.audible.com/cat/a");
        let calls = Cell::new(0);

        let first: Doc = store
            .get_or_compute(&key, || {
                calls.set(calls.get() + 1);
                Ok::<_, CacheError>(doc())
            })
            .unwrap();
        let second: Doc = store
            .get_or_compute(&key, || {
                calls.set(calls.get() + 1);
                Ok::<_, CacheError>(doc())
            })
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_keys_differing_in_case_and_padding_share_path() {
        let (_dir, store) = store();
        let a = CacheKey::url("https://www.audible.com/cat/Mystery");
        let b = CacheKey::url("  HTTPS://WWW.AUDIBLE.COM/cat/mystery\n");
        assert_eq!(store.path_for(&a), store.path_for(&b));
    }

    #[test]
    fn test_normalized_key_hits_existing_entry() {
        let (_dir, store) = store();
        store
            .store(&CacheKey::url("https://www.audible.com/cat/x"), &doc())
            .unwrap();

        let result: Doc = store
            .get_or_compute(&CacheKey::url(" https://WWW.audible.com/cat/X "), || {
                Err(BestsellerError::MissingContainer {
                    url: "unreachable".to_string(),
                })
            })
            .unwrap();
        assert_eq!(result, doc());
    }

    #[test]
    fn test_failed_compute_writes_nothing() {
        let (_dir, store) = store();
        let key = CacheKey::url("https://www.audible.com/cat/broken");

        let result: Result<Doc, BestsellerError> = store.get_or_compute(&key, || {
            Err(BestsellerError::MissingContainer {
                url: "https://www.audible.com/cat/broken".to_string(),
            })
        });

        assert!(matches!(
            result,
            Err(BestsellerError::MissingContainer { .. })
        ));
        assert!(!store.contains(&key));
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_fixed_key_uses_given_path() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("pages"));
        let path = dir.path().join("data").join("cats.json");

        let written = store.store(&CacheKey::fixed(&path), &doc()).unwrap();

        assert_eq!(written, path);
        assert!(path.is_file());
    }

    #[test]
    fn test_document_has_sorted_keys_and_indentation() {
        let (_dir, store) = store();
        let key = CacheKey::url("https://www.audible.com/cat/sorted");
        let path = store.store(&key, &doc()).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "{\n  \"apple\": \"red\",\n  \"zebra\": 7\n}\n");
    }

    #[test]
    fn test_load_missing_entry_is_none() {
        let (_dir, store) = store();
        let loaded: Option<Doc> = store
            .load(&CacheKey::url("https://www.audible.com/none"))
            .unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_entry_is_an_error() {
        let (_dir, store) = store();
        let key = CacheKey::url("https://www.audible.com/cat/garbled");
        let path = store.path_for(&key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let result: CacheResult<Option<Doc>> = store.load(&key);
        assert!(matches!(result, Err(CacheError::Malformed { .. })));
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let (_dir, store) = store();
        store
            .store(&CacheKey::url("https://www.audible.com/cat/a"), &doc())
            .unwrap();
        store
            .store(&CacheKey::url("https://www.audible.com/cat/b"), &doc())
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|name| name.ends_with(".json")));
    }

    #[tokio::test]
    async fn test_async_variant_computes_once() {
        let (_dir, store) = store();
        let key = CacheKey::url("https://www.audible.com/cat/async");
        let calls = Cell::new(0);

        for _ in 0..2 {
            let value: Doc = store
                .get_or_compute_async(&key, || async {
                    calls.set(calls.get() + 1);
                    Ok::<_, CacheError>(doc())
                })
                .await
                .unwrap();
            assert_eq!(value, doc());
        }

        assert_eq!(calls.get(), 1);
    }
}
