//! Disk-backed document store for cached remote data
//!
//! Provides a `CacheStore` that persists one JSON document per key in an
//! XDG-compliant cache directory. Each document holds an item sequence and the
//! timestamp of its last successful write; freshness is decided elsewhere (see
//! [`crate::cache::is_fresh`]), so records are returned regardless of age.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A single cached document: the payload items and when they were written
///
/// Records are replaced wholesale on every write and never merged or deleted;
/// a newer write to the same key simply supersedes the old record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord<T> {
    /// The cached payload, opaque to the cache layer
    pub items: Vec<T>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// Manages reading and writing cached documents on disk
///
/// The store keeps data as JSON files in an XDG-compliant cache directory
/// (`~/.cache/spacescope/` on Linux). Reads fail softly: a missing file, an
/// I/O error, or an unparsable document all read as "absent" so callers can
/// fall through to a fresh fetch.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory); the application then runs uncached.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "spacescope")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheStore with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to the document for the given key
    fn record_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes the items for `key`, replacing any existing record
    ///
    /// The record's `updated_at` is stamped with the current time at write,
    /// never with a caller-supplied time. An empty item sequence is stored
    /// as-is; no implicit filtering happens here.
    pub fn write<T: Serialize>(&self, key: &str, items: &[T]) -> std::io::Result<()> {
        self.ensure_dir()?;

        let record = CacheRecordRef {
            items,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.record_path(key), json)
    }

    /// Reads the record for `key`
    ///
    /// Returns `None` if the record does not exist or cannot be parsed (a
    /// malformed `updated_at` therefore reads as absent). Stale records are
    /// still returned; the caller decides freshness.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CacheRecord<T>> {
        let path = self.record_path(key);
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

/// Borrowing twin of `CacheRecord` so `write` can serialize a slice without
/// cloning the items first. Field names must match `CacheRecord`.
#[derive(Serialize)]
struct CacheRecordRef<'a, T> {
    items: &'a [T],
    updated_at: DateTime<Utc>,
}
