mod cache;
mod fetcher;
mod handler;
mod store;
mod supervisor;

pub use cache::{CACHE_TTL_SECS, CacheKey, EphemerisCache, truncate_to_minute};
pub use fetcher::{FetchStatus, MultiBodyFetcher};
pub use handler::{LiveError, LiveRequestHandler, PositionMeta, ResolvedPosition};
pub use store::LivePositionStore;
pub use supervisor::LiveSupervisor;
