use super::fetcher::{FetchStatus, MultiBodyFetcher};
use super::store::LivePositionStore;
use crate::{info, log, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

/// Periodic live-data refresher.
///
/// Drives the fan-out on a fixed cadence, independent of the per-frame
/// render rate of whatever consumes the store. A cycle that is still in
/// flight when the next tick arrives is not stacked: the tick is skipped
/// via the single-flight lock.
pub struct LiveSupervisor {
    fetcher: Arc<MultiBodyFetcher>,
    store: Arc<LivePositionStore>,
    refresh: Duration,
    in_flight: Mutex<()>,
}

impl LiveSupervisor {
    /// Default refresh cadence for live mode.
    pub const DEFAULT_REFRESH: Duration = Duration::from_secs(15);

    pub fn new(fetcher: Arc<MultiBodyFetcher>, store: Arc<LivePositionStore>, refresh: Duration) -> Self {
        Self { fetcher, store, refresh, in_flight: Mutex::new(()) }
    }

    /// Runs the refresh loop forever. The first cycle fires immediately.
    pub async fn run(&self) {
        self.store.set_live(true);
        info!("Live refresh loop started, cadence {}s", self.refresh.as_secs());
        let mut tick = tokio::time::interval(self.refresh);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            self.refresh_once().await;
        }
    }

    /// One refresh cycle: fan out, then swap the store wholesale.
    ///
    /// Total failure still swaps (an empty map); consumers fall through to
    /// the element/fallback tiers on absence, which keeps the behavior on
    /// a dead upstream identical to the behavior on a missing body.
    pub async fn refresh_once(&self) {
        let Ok(_in_flight) = self.in_flight.try_lock() else {
            log!("Previous live refresh still in flight, skipping this cycle");
            return;
        };
        let positions = self
            .fetcher
            .fetch_all(|status| match status {
                FetchStatus::Loading => log!("{status}"),
                FetchStatus::Complete { .. } => info!("{status}"),
                FetchStatus::Partial { .. } => warn!("{status}"),
            })
            .await;
        self.store.replace(positions);
    }
}
