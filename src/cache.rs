use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Durable request-to-body cache persisted as a single JSON object.
///
/// Entries never expire and the store grows monotonically; clearing it means
/// deleting the cache file.
pub struct CacheStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

/// Canonical cache key for a request: the URL followed by the sorted
/// `key_value` parameter pairs, all joined by `_`. Parameter order does not
/// matter; a different parameter set yields a different key.
pub fn request_key(url: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}_{v}")).collect();
    pairs.sort();
    format!("{}_{}", url, pairs.join("_"))
}

impl CacheStore {
    /// Reads the persisted store. A missing, unreadable, or invalid cache
    /// file yields an empty store rather than an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        CacheStore { path, entries }
    }

    /// Serializes the whole store and atomically replaces the cache file
    /// (write to a temp file in the same directory, then rename).
    pub fn save(&self) -> io::Result<()> {
        let raw = serde_json::to_string(&self.entries).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)
    }

    /// Returns the cached body for `key`, or invokes `fetch_fn`, stores the
    /// result under `key`, persists the store, and returns it. The lookup
    /// key and the storage key are always the same string.
    ///
    /// A failed persist is reported on stderr but does not discard the
    /// fetched body; at most the in-flight entry is lost on the next run.
    pub fn get_or_fetch<F>(&mut self, key: &str, fetch_fn: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(body) = self.entries.get(key) {
            println!("Using Cache");
            return Ok(body.clone());
        }
        println!("Fetching");
        let body = fetch_fn()?;
        self.entries.insert(key.to_string(), body.clone());
        if let Err(err) = self.save() {
            eprintln!("[Warning] failed to persist cache: {err}");
        }
        Ok(body)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
