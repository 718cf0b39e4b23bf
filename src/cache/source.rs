//! Cache-aside orchestrator composing store, policy, and a domain fetcher
//!
//! One `CachedSource` is configured per data domain with its own key, TTL, and
//! mock fallback. `get` never fails: every external call (store read, fetch,
//! store write) is independently fault-isolated and the worst case is serving
//! mock or stale data.
//!
//! There is no request coalescing: concurrent callers racing on the same key
//! during a miss will each fetch and redundantly overwrite the store. The
//! write is a last-writer-wins whole-record replace, which is acceptable here
//! because staleness self-heals at the next TTL expiry.

use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

use super::policy::is_fresh;
use super::store::CacheStore;

/// Default bound on how long a single domain fetch may run
const DEFAULT_FETCH_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// A freshness-gated view over one remote data domain
///
/// Composes the cache store, the freshness policy, and a caller-supplied
/// fetcher into a single read-through operation with a fixed fallback chain:
/// fresh cache, fresh fetch, stale cache, mock dataset, empty.
#[derive(Debug, Clone)]
pub struct CachedSource<T> {
    /// Backing store; `None` runs the source uncached (every get fetches)
    store: Option<CacheStore>,
    /// Document key for this domain (e.g. "global_launches")
    key: String,
    /// Maximum age before a cached record is considered stale
    ttl: Duration,
    /// Bound on a single fetch; a hung upstream degrades instead of hanging us
    fetch_timeout: StdDuration,
    /// Hard-coded fallback dataset used when no cached record exists at all
    mock: fn() -> Vec<T>,
}

impl<T> CachedSource<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Creates a source for one domain
    ///
    /// # Arguments
    /// * `store` - Injected cache store, or `None` to run uncached
    /// * `key` - Document key, unique per domain
    /// * `ttl` - Freshness window for cached records
    /// * `mock` - Fallback dataset supplier; return an empty vec for domains
    ///   that should degrade straight to empty
    pub fn new(
        store: Option<CacheStore>,
        key: impl Into<String>,
        ttl: Duration,
        mock: fn() -> Vec<T>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            mock,
        }
    }

    /// Overrides the per-fetch timeout
    #[allow(dead_code)]
    pub fn with_fetch_timeout(mut self, fetch_timeout: StdDuration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Returns this source's document key
    #[allow(dead_code)]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the domain's items, never failing
    ///
    /// Serves the cached record when fresh (zero fetch calls). On a miss the
    /// fetcher runs once under a timeout; a non-empty success is written back
    /// and returned. On fetch failure, timeout, or an empty result, degrades
    /// to the stale record if one exists, then to the mock dataset, then to
    /// an empty sequence. Fetch errors are logged and never propagated.
    pub async fn get<F, Fut, E>(&self, fetch: F) -> Vec<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: std::fmt::Display,
    {
        let record = self.store.as_ref().and_then(|store| store.read::<T>(&self.key));

        if let Some(record) = &record {
            if is_fresh(Some(record), self.ttl, Utc::now()) {
                debug!(key = %self.key, "cache hit");
                return record.items.clone();
            }
        }
        debug!(key = %self.key, "cache miss");

        let fetched = match tokio::time::timeout(self.fetch_timeout, fetch()).await {
            Ok(Ok(items)) if !items.is_empty() => Some(items),
            Ok(Ok(_)) => {
                warn!(key = %self.key, "fetch returned no items, degrading");
                None
            }
            Ok(Err(error)) => {
                warn!(key = %self.key, %error, "fetch failed, degrading");
                None
            }
            Err(_) => {
                warn!(key = %self.key, "fetch timed out, degrading");
                None
            }
        };

        match fetched {
            Some(items) => {
                if let Some(store) = &self.store {
                    if let Err(error) = store.write(&self.key, &items) {
                        // A lost write only costs a refetch on the next miss
                        warn!(key = %self.key, %error, "cache write failed");
                    }
                }
                items
            }
            None => match record {
                Some(record) => {
                    debug!(key = %self.key, "serving stale record");
                    record.items
                }
                None => {
                    debug!(key = %self.key, "serving mock dataset");
                    (self.mock)()
                }
            },
        }
    }
}
