use super::kepler::{AU_TO_KM, ResolveError, elements_to_xy};
use super::scale::{DistanceScale, OrbitScales};
use crate::bodies::{Body, BodyClass, ElementsStore};
use crate::live::LivePositionStore;
use crate::util::Vec2D;
use std::f64::consts::TAU;
use std::sync::Arc;
use strum_macros::Display;

/// Which data the resolver may use for tier 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ResolveMode {
    /// Prefer live upstream data when the store has it.
    Live,
    /// Ignore the live store entirely.
    Simulation,
}

/// Animation-time divisor applied before the element solve: the consumer
/// feeds raw clock ticks, tier 2 works in days past epoch.
const ELEMENTS_TIME_DIVISOR: f64 = 100.0;
/// Period multipliers for the uniform circular fallback.
const PLANET_PERIOD_SCALE: f64 = 100.0;
const MOON_PERIOD_SCALE: f64 = 50.0;

/// Places a body in display space for a given simulation time.
///
/// Resolution runs down three tiers: live upstream data, precomputed
/// Keplerian elements, and a uniform circular orbit. The last tier cannot
/// fail, so a body always renders even with no network data at all.
/// Reads the live store and elements table, mutates nothing.
pub struct PositionResolver {
    live: Arc<LivePositionStore>,
    elements: Arc<ElementsStore>,
    scales: OrbitScales,
}

impl PositionResolver {
    pub fn new(live: Arc<LivePositionStore>, elements: Arc<ElementsStore>, scales: OrbitScales) -> Self {
        Self { live, elements, scales }
    }

    /// Resolves a star or planet to projected display coordinates.
    ///
    /// # Arguments
    /// * `body` – Catalog entry to place.
    /// * `sim_time` – Animation clock value supplied by the consumer.
    /// * `mode` – Whether tier 1 (live data) may be used.
    ///
    /// # Errors
    /// [`ResolveError`] when tier 2 elements are present but malformed
    /// enough that the Kepler solve diverges.
    pub fn resolve(&self, body: &Body, sim_time: f64, mode: ResolveMode) -> Result<Vec2D<f64>, ResolveError> {
        if body.class() == BodyClass::Star {
            return Ok(Vec2D::new(0.0, 0.0));
        }

        if mode == ResolveMode::Live {
            if let Some(live) = self.live.get(body.name()) {
                return Ok(project_radial(
                    live.planar_radius(),
                    live.planar_angle(),
                    &self.scales.planet,
                ));
            }
        }

        if let Some(elements) = self.elements.get(body.name()) {
            let au = elements_to_xy(elements, sim_time / ELEMENTS_TIME_DIVISOR)?;
            let km = au * AU_TO_KM;
            return Ok(project_radial(km.abs(), km.angle(), &self.scales.planet));
        }

        let angle = sim_time / (body.period_days() * PLANET_PERIOD_SCALE) * TAU;
        Ok(Vec2D::from_polar(self.scales.planet.project(body.orbit_km()), angle))
    }

    /// Resolves a moon relative to its already-resolved parent planet.
    ///
    /// With live vectors for both moon and parent, the moon-minus-parent
    /// offset keeps the true bearing; otherwise the moon runs a local
    /// circular orbit around the parent. Either way the returned position
    /// is parent-composed, ready for display.
    pub fn resolve_moon(
        &self,
        moon: &Body,
        parent_position: Vec2D<f64>,
        sim_time: f64,
        mode: ResolveMode,
    ) -> Vec2D<f64> {
        if mode == ResolveMode::Live {
            let live_pair = moon
                .parent()
                .and_then(|parent| self.live.get(parent))
                .zip(self.live.get(moon.name()));
            if let Some((parent_live, moon_live)) = live_pair {
                let offset = moon_live.relative_to(&parent_live);
                return parent_position
                    + project_radial(offset.planar_radius(), offset.planar_angle(), &self.scales.moon);
            }
        }

        let angle = sim_time / (moon.period_days() * MOON_PERIOD_SCALE) * TAU;
        parent_position + Vec2D::from_polar(self.scales.moon.project(moon.orbit_km()), angle)
    }
}

/// Re-projects a (radius, angle) pair through a log scale, keeping the
/// angle and compressing the radius.
fn project_radial(radius_km: f64, angle: f64, scale: &DistanceScale) -> Vec2D<f64> {
    Vec2D::from_polar(scale.project(radius_km), angle)
}
