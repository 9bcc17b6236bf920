#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod bodies;
mod horizons;
mod live;
mod logger;
mod resolve;
mod server;
mod util;

use crate::bodies::{BodyCatalog, ElementsStore};
use crate::horizons::HTTPClient;
use crate::live::{
    EphemerisCache, LivePositionStore, LiveRequestHandler, LiveSupervisor, MultiBodyFetcher,
};
use crate::resolve::{OrbitScales, PositionResolver};
use crate::server::LiveEndpoint;
use std::{env, sync::Arc, time::Duration};

const DEFAULT_HORIZONS_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";
const DEFAULT_ELEMENTS_URL: &str =
    "https://raw.githubusercontent.com/daviteixeira-dev/Data-Visualization-SolarViz/main/data/planets_static.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REFRESH_SECS: u64 = 15;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Bundle of the pipeline subsystems, composed once at startup.
///
/// Every store is an explicit owned object injected where it is needed;
/// nothing here is a module-level global. The resolver and live store are
/// what an in-process presentation layer drives once per frame.
struct Pipeline {
    client: Arc<HTTPClient>,
    catalog: Arc<BodyCatalog>,
    cache: Arc<EphemerisCache>,
    handler: Arc<LiveRequestHandler>,
    fetcher: Arc<MultiBodyFetcher>,
    live_store: Arc<LivePositionStore>,
    elements: Arc<ElementsStore>,
    resolver: Arc<PositionResolver>,
    supervisor: Arc<LiveSupervisor>,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let horizons_url = env_or("SOLARVIZ_HORIZONS_URL", DEFAULT_HORIZONS_URL);
    let elements_url = env_or("SOLARVIZ_ELEMENTS_URL", DEFAULT_ELEMENTS_URL);
    let bind_addr = env_or("SOLARVIZ_BIND_ADDR", DEFAULT_BIND_ADDR);
    let refresh = Duration::from_secs(env_u64("SOLARVIZ_REFRESH_SECS", DEFAULT_REFRESH_SECS));
    let timeout = Duration::from_secs(env_u64("SOLARVIZ_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));

    let pipeline = init(&horizons_url, &elements_url, timeout, refresh).await;

    let supervisor = Arc::clone(&pipeline.supervisor);
    tokio::spawn(async move {
        supervisor.run().await;
    });

    let endpoint = LiveEndpoint::new(Arc::clone(&pipeline.handler));
    if let Err(e) = endpoint.serve(&bind_addr).await {
        fatal!("Live endpoint terminated: {e}");
    }
}

async fn init(
    horizons_url: &str,
    elements_url: &str,
    timeout: Duration,
    refresh: Duration,
) -> Pipeline {
    let client = Arc::new(HTTPClient::new(horizons_url, timeout));
    let catalog = Arc::new(BodyCatalog::new());
    let cache = Arc::new(EphemerisCache::new());
    let handler = Arc::new(LiveRequestHandler::new(
        Arc::clone(&client),
        Arc::clone(&catalog),
        Arc::clone(&cache),
    ));
    let fetcher = Arc::new(MultiBodyFetcher::new(Arc::clone(&handler), Arc::clone(&catalog)));
    let live_store = Arc::new(LivePositionStore::new());

    let elements = match ElementsStore::fetch(&client, elements_url).await {
        Ok(store) => {
            info!("Loaded static orbital elements for {} bodies", store.len());
            Arc::new(store)
        }
        Err(e) => {
            warn!("Static elements unavailable, element tier disabled: {e}");
            Arc::new(ElementsStore::empty())
        }
    };

    let resolver = Arc::new(PositionResolver::new(
        Arc::clone(&live_store),
        Arc::clone(&elements),
        OrbitScales::visualization_default(),
    ));
    let supervisor = Arc::new(LiveSupervisor::new(
        Arc::clone(&fetcher),
        Arc::clone(&live_store),
        refresh,
    ));

    info!("Pipeline initialized, tracking {} bodies", catalog.tracked().count());
    Pipeline {
        client,
        catalog,
        cache,
        handler,
        fetcher,
        live_store,
        elements,
        resolver,
        supervisor,
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
