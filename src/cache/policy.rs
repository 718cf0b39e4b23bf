//! Freshness policy for cached records
//!
//! A record is fresh iff `now - updated_at < ttl`. TTLs are owned by the
//! per-domain orchestrators, not by the store, so the same record can be
//! judged against different policies without rewriting it. Staleness is
//! monotonic: a record never becomes fresh again without a write.

use chrono::{DateTime, Duration, Utc};

use super::store::CacheRecord;

/// Decides whether a cached record is still fresh
///
/// Returns `false` when the record is absent or its age has reached the TTL.
/// For a record written at `t0`, this is `true` for all `now` in
/// `[t0, t0 + ttl)` and `false` for all `now >= t0 + ttl`.
pub fn is_fresh<T>(record: Option<&CacheRecord<T>>, ttl: Duration, now: DateTime<Utc>) -> bool {
    match record {
        Some(record) => now - record.updated_at < ttl,
        None => false,
    }
}
