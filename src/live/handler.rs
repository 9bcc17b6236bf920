use super::cache::{CacheKey, EphemerisCache, truncate_to_minute};
use crate::bodies::{BodyCatalog, PositionVector};
use crate::horizons::{HTTPClient, HorizonsError, VectorRequest, extract};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use strum_macros::Display;

/// Attribution string echoed in every resolved payload.
const UPSTREAM_SOURCE: &str = "JPL Horizons / ssd.jpl.nasa.gov";

/// Everything that can go wrong resolving a single live-position request.
#[derive(Debug, Display)]
pub enum LiveError {
    #[strum(to_string = "unknown body: {0}")]
    UnknownBody(String),
    #[strum(to_string = "invalid time (use RFC 3339 or \"now\"): {0}")]
    InvalidTime(String),
    #[strum(to_string = "{0}")]
    Upstream(HorizonsError),
    #[strum(to_string = "could not extract a position vector from the upstream response")]
    UnrecognizedShape,
}

impl std::error::Error for LiveError {}

impl From<HorizonsError> for LiveError {
    fn from(value: HorizonsError) -> Self { LiveError::Upstream(value) }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PositionMeta {
    pub generated_at: String,
    pub source: String,
}

/// A resolved heliocentric position for one body at one minute, the unit
/// the cache stores and the endpoint serializes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResolvedPosition {
    /// Whether this answer was served from the process cache.
    pub cached: bool,
    /// Canonical body name.
    pub body: String,
    /// The resolved request minute, RFC 3339 with milliseconds.
    pub time: String,
    pub position: PositionVector,
    pub meta: PositionMeta,
}

/// Orchestrates one body+time request: validation, cache probe, upstream
/// call, extraction, cache fill.
///
/// The only state it mutates is the injected cache.
pub struct LiveRequestHandler {
    client: Arc<HTTPClient>,
    catalog: Arc<BodyCatalog>,
    cache: Arc<EphemerisCache>,
}

impl LiveRequestHandler {
    pub fn new(client: Arc<HTTPClient>, catalog: Arc<BodyCatalog>, cache: Arc<EphemerisCache>) -> Self {
        Self { client, catalog, cache }
    }

    pub fn catalog(&self) -> &BodyCatalog { &self.catalog }

    /// Resolves `body_name` at `time` (`"now"` or RFC 3339).
    ///
    /// A fresh cache hit is returned immediately, tagged `cached`; this is
    /// the primary latency and upstream-volume optimization. Every failure
    /// is terminal for this request — retry happens only through the next
    /// externally scheduled cycle.
    pub async fn handle(&self, body_name: &str, time: &str) -> Result<ResolvedPosition, LiveError> {
        let body = self
            .catalog
            .lookup(body_name)
            .ok_or_else(|| LiveError::UnknownBody(body_name.to_string()))?;
        let start = resolve_time(time)?;
        let stamp = VectorRequest::wire_timestamp(start);
        let key = CacheKey::new(body.command_code(), &stamp);

        if let Some(mut hit) = self.cache.lookup(&key, Utc::now().timestamp()) {
            hit.cached = true;
            return Ok(hit);
        }

        let raw = VectorRequest::for_minute(body.command_code(), start).send(&self.client).await?;
        let position = extract::extract(&raw).ok_or(LiveError::UnrecognizedShape)?;

        let resolved = ResolvedPosition {
            cached: false,
            body: body.name().to_string(),
            time: stamp,
            position,
            meta: PositionMeta {
                generated_at: VectorRequest::wire_timestamp(Utc::now()),
                source: UPSTREAM_SOURCE.to_string(),
            },
        };
        self.cache.store(key, resolved.clone(), Utc::now().timestamp());
        Ok(resolved)
    }
}

/// `"now"` truncates to the current minute so concurrent callers share a
/// cache key; explicit times are normalized to UTC as supplied.
fn resolve_time(raw: &str) -> Result<DateTime<Utc>, LiveError> {
    let trimmed = raw.trim();
    if trimmed == "now" {
        return Ok(truncate_to_minute(Utc::now()));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| LiveError::InvalidTime(raw.to_string()))
}
