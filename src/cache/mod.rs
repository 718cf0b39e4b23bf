//! Freshness-gated cache for remote space data
//!
//! Every remote data domain (sky events, launches, space weather, imagery)
//! shares the same cache-aside mechanism: a key-value store of JSON documents
//! on disk, a pure freshness policy, and a per-domain orchestrator that serves
//! cached items when fresh and otherwise fetches, persists, and degrades
//! through a fallback chain (stale record, then mock dataset, then empty)
//! when the fetch fails.

mod policy;
mod source;
mod store;

pub use policy::is_fresh;
pub use source::CachedSource;
pub use store::{CacheRecord, CacheStore};
