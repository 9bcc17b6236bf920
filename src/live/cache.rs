use super::handler::ResolvedPosition;
use chrono::{DateTime, Timelike, Utc};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

/// Seconds a cached upstream answer stays servable.
pub const CACHE_TTL_SECS: i64 = 60;

/// Cache key for one (body, minute) upstream query.
///
/// The timestamp half is the wire-format RFC 3339 stamp: for "now"
/// requests it is truncated to the minute, which is what folds many
/// near-simultaneous requests into a single upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    command_code: String,
    timestamp: String,
}

impl CacheKey {
    pub fn new(command_code: &str, timestamp: &str) -> Self {
        Self { command_code: command_code.to_string(), timestamp: timestamp.to_string() }
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.command_code, self.timestamp)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    /// Unix seconds at insertion, the reference point for staleness.
    inserted: i64,
    payload: ResolvedPosition,
}

/// Process-local TTL cache for resolved positions.
///
/// Entries are never evicted, only overwritten once stale; the map grows
/// with the set of distinct keys for the process lifetime, which is
/// bounded for "now" traffic (one key per body per minute) and acceptable
/// for short-lived instances. Writers for the same key may race;
/// last-write-wins.
#[derive(Debug, Default)]
pub struct EphemerisCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl EphemerisCache {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    /// Returns the cached payload when a fresh entry exists for `key`.
    pub fn lookup(&self, key: &CacheKey, now_secs: i64) -> Option<ResolvedPosition> {
        let guard = self.entries.lock().ok()?;
        let entry = guard.get(key)?;
        (now_secs - entry.inserted < CACHE_TTL_SECS).then(|| entry.payload.clone())
    }

    /// Unconditional overwrite for `key`.
    pub fn store(&self, key: CacheKey, payload: ResolvedPosition, now_secs: i64) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key, CacheEntry { inserted: now_secs, payload });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |guard| guard.len())
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Truncates a timestamp to the start of its minute (seconds and
/// sub-seconds zeroed), the bucket granularity for "now" requests.
pub fn truncate_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::PositionVector;
    use crate::live::handler::PositionMeta;
    use chrono::TimeZone;

    fn payload(name: &str) -> ResolvedPosition {
        ResolvedPosition {
            cached: false,
            body: name.to_string(),
            time: "2025-01-01T00:00:00.000Z".to_string(),
            position: PositionVector::new(1.0, 2.0, 3.0),
            meta: PositionMeta {
                generated_at: "2025-01-01T00:00:01.000Z".to_string(),
                source: "test".to_string(),
            },
        }
    }

    #[test]
    fn key_display_matches_wire_form() {
        let key = CacheKey::new("499", "2025-01-01T00:00:00.000Z");
        assert_eq!(key.to_string(), "499:2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn fresh_within_ttl_stale_after() {
        let cache = EphemerisCache::new();
        let key = CacheKey::new("499", "2025-01-01T00:00:00.000Z");
        cache.store(key.clone(), payload("Mars"), 1_000);

        assert!(cache.lookup(&key, 1_000).is_some());
        assert!(cache.lookup(&key, 1_059).is_some());
        assert!(cache.lookup(&key, 1_060).is_none(), "entry at exactly TTL is stale");
        assert!(cache.lookup(&key, 1_061).is_none());
    }

    #[test]
    fn overwrite_replaces_the_single_entry_per_key() {
        let cache = EphemerisCache::new();
        let key = CacheKey::new("499", "2025-01-01T00:00:00.000Z");
        cache.store(key.clone(), payload("Mars"), 1_000);
        cache.store(key.clone(), payload("Mars-2"), 2_000);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&key, 2_001).unwrap().body, "Mars-2");
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache = EphemerisCache::new();
        cache.store(CacheKey::new("499", "t"), payload("Mars"), 0);
        cache.store(CacheKey::new("599", "t"), payload("Jupiter"), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn minute_truncation_zeroes_seconds_and_subseconds() {
        let t = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
            + chrono::TimeDelta::milliseconds(535);
        let truncated = truncate_to_minute(t);
        assert_eq!(truncated, Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 0).unwrap());
        assert_eq!(truncate_to_minute(truncated), truncated);
    }
}
