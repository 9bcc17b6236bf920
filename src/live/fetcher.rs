use super::handler::LiveRequestHandler;
use crate::bodies::{BodyCatalog, PositionVector};
use crate::warn;
use futures::future::join_all;
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;
use strum_macros::Display;

/// Aggregate outcome of one fan-out cycle, reported through the status
/// callback before the result map is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchStatus {
    #[strum(to_string = "refreshing live positions")]
    Loading,
    #[strum(to_string = "all {count} bodies fetched")]
    Complete { count: usize },
    #[strum(to_string = "{fetched}/{total} bodies fetched")]
    Partial { fetched: usize, total: usize },
}

/// Fans single-body requests out across the tracked set concurrently and
/// aggregates the successes into a name-keyed position map.
///
/// An individual failure degrades that body to absence — callers must
/// treat a missing name as "no data", never as the origin. Nothing is
/// retried within one cycle; the next scheduled refresh is the retry.
pub struct MultiBodyFetcher {
    handler: Arc<LiveRequestHandler>,
    catalog: Arc<BodyCatalog>,
}

impl MultiBodyFetcher {
    pub fn new(handler: Arc<LiveRequestHandler>, catalog: Arc<BodyCatalog>) -> Self {
        Self { handler, catalog }
    }

    /// Refreshes every tracked body at the current minute.
    pub async fn fetch_all(&self, on_status: impl Fn(&FetchStatus)) -> HashMap<String, PositionVector> {
        let names: Vec<&str> = self.catalog.tracked().map(crate::bodies::Body::name).collect();
        self.fetch_at(&names, "now", on_status).await
    }

    /// Issues one handler call per name, all in flight at once.
    ///
    /// Sequential dispatch would serialize 14 network round-trips behind
    /// the slowest body; the batch latency here is the slowest single
    /// call instead.
    pub async fn fetch_at(
        &self,
        names: &[&str],
        time: &str,
        on_status: impl Fn(&FetchStatus),
    ) -> HashMap<String, PositionVector> {
        on_status(&FetchStatus::Loading);
        let total = names.len();

        let requests = names.iter().map(|&name| async move {
            self.handler
                .handle(name, time)
                .await
                .map(|resolved| (resolved.body, resolved.position))
                .map_err(|e| (name, e))
        });
        let settled = join_all(requests).await;

        let mut positions = HashMap::with_capacity(total);
        let mut failed = Vec::new();
        for outcome in settled {
            match outcome {
                Ok((name, position)) => {
                    positions.insert(name, position);
                }
                Err((name, e)) => {
                    warn!("Live fetch for {name} failed: {e}");
                    failed.push(name);
                }
            }
        }

        let status = if positions.len() == total {
            FetchStatus::Complete { count: total }
        } else {
            warn!("Missing live data for {}", failed.iter().join(", "));
            FetchStatus::Partial { fetched: positions.len(), total }
        };
        on_status(&status);
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizons::HTTPClient;
    use crate::live::cache::{CacheKey, EphemerisCache};
    use crate::live::handler::{PositionMeta, ResolvedPosition};
    use chrono::Utc;
    use std::sync::Mutex;
    use std::time::Duration;

    const STAMP: &str = "2025-01-01T00:00:00.000Z";

    fn prefill(cache: &EphemerisCache, name: &str, code: &str) {
        let payload = ResolvedPosition {
            cached: false,
            body: name.to_string(),
            time: STAMP.to_string(),
            position: PositionVector::new(1.0, 1.0, 0.0),
            meta: PositionMeta { generated_at: STAMP.to_string(), source: "test".to_string() },
        };
        cache.store(CacheKey::new(code, STAMP), payload, Utc::now().timestamp());
    }

    fn fetcher(cache: Arc<EphemerisCache>) -> MultiBodyFetcher {
        let client = Arc::new(HTTPClient::new("http://127.0.0.1:9", Duration::from_millis(250)));
        let catalog = Arc::new(BodyCatalog::new());
        let handler = Arc::new(LiveRequestHandler::new(client, Arc::clone(&catalog), cache));
        MultiBodyFetcher::new(handler, catalog)
    }

    #[tokio::test]
    async fn one_failure_degrades_to_absence_not_batch_abort() {
        let cache = Arc::new(EphemerisCache::new());
        prefill(&cache, "Mars", "499");
        prefill(&cache, "Venus", "299");
        let fetcher = fetcher(cache);

        let statuses = Mutex::new(Vec::new());
        let map = fetcher
            .fetch_at(&["Mars", "Venus", "Jupiter"], STAMP, |s| {
                if let Ok(mut v) = statuses.lock() {
                    v.push(*s);
                }
            })
            .await;

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("Mars"));
        assert!(map.contains_key("Venus"));
        assert!(!map.contains_key("Jupiter"), "failed body must be absent, not zeroed");

        let statuses = statuses.into_inner().unwrap();
        assert_eq!(statuses[0], FetchStatus::Loading);
        assert_eq!(statuses[1], FetchStatus::Partial { fetched: 2, total: 3 });
    }

    #[tokio::test]
    async fn full_success_reports_complete() {
        let cache = Arc::new(EphemerisCache::new());
        prefill(&cache, "Mars", "499");
        prefill(&cache, "Earth", "399");
        let fetcher = fetcher(cache);

        let statuses = Mutex::new(Vec::new());
        let map = fetcher
            .fetch_at(&["Mars", "Earth"], STAMP, |s| {
                if let Ok(mut v) = statuses.lock() {
                    v.push(*s);
                }
            })
            .await;

        assert_eq!(map.len(), 2);
        let statuses = statuses.into_inner().unwrap();
        assert_eq!(statuses.last(), Some(&FetchStatus::Complete { count: 2 }));
    }

    #[tokio::test]
    async fn canonical_names_key_the_result_map() {
        let cache = Arc::new(EphemerisCache::new());
        prefill(&cache, "Mars", "499");
        let fetcher = fetcher(cache);

        let map = fetcher.fetch_at(&["mArS"], STAMP, |_| {}).await;
        assert!(map.contains_key("Mars"));
    }
}
