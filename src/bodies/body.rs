use strum_macros::Display;

/// Classification of a cataloged celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, serde::Serialize)]
pub enum BodyClass {
    Star,
    Planet,
    Moon,
}

/// Cartesian heliocentric position in kilometers.
///
/// Produced whole or not at all: every constructor yields all three
/// components, and the extraction layer rejects candidates with any
/// non-numeric component instead of zero-filling.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PositionVector {
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
}

impl PositionVector {
    pub const fn new(x_km: f64, y_km: f64, z_km: f64) -> Self { Self { x_km, y_km, z_km } }

    /// Distance from the Sun projected onto the ecliptic XY plane.
    pub fn planar_radius(&self) -> f64 { self.x_km.hypot(self.y_km) }

    /// Polar angle of the XY projection, in radians.
    pub fn planar_angle(&self) -> f64 { self.y_km.atan2(self.x_km) }

    /// Component-wise difference, used for moon-minus-parent offsets.
    pub fn relative_to(&self, other: &Self) -> Self {
        Self::new(
            self.x_km - other.x_km,
            self.y_km - other.y_km,
            self.z_km - other.z_km,
        )
    }
}

/// Static reference data for one tracked solar-system body.
///
/// Loaded once at startup as part of the catalog and never mutated. Orbital
/// parameters describe the mean solar orbit for planets and the orbit
/// around the parent planet for moons.
#[derive(Debug, Clone)]
pub struct Body {
    /// Canonical name, unique across the catalog.
    name: &'static str,
    class: BodyClass,
    /// Canonical name of the parent planet; moons only.
    parent: Option<&'static str>,
    /// Numeric body identifier of the upstream ephemeris service.
    command_code: &'static str,
    /// Mean orbit radius around the gravitational center, in km.
    orbit_km: f64,
    /// Orbital period in days.
    period_days: f64,
    eccentricity: f64,
    inclination_deg: f64,
    periapsis_arg_deg: f64,
    /// Radius used by the visualization, in px.
    visual_radius: f64,
    /// Physical radius in km.
    radius_km: f64,
}

impl Body {
    #[allow(clippy::too_many_arguments)]
    pub(super) const fn new(
        name: &'static str,
        class: BodyClass,
        parent: Option<&'static str>,
        command_code: &'static str,
        orbit_km: f64,
        period_days: f64,
        eccentricity: f64,
        inclination_deg: f64,
        periapsis_arg_deg: f64,
        visual_radius: f64,
        radius_km: f64,
    ) -> Self {
        Self {
            name,
            class,
            parent,
            command_code,
            orbit_km,
            period_days,
            eccentricity,
            inclination_deg,
            periapsis_arg_deg,
            visual_radius,
            radius_km,
        }
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn class(&self) -> BodyClass { self.class }
    pub fn parent(&self) -> Option<&'static str> { self.parent }
    pub fn command_code(&self) -> &'static str { self.command_code }
    pub fn orbit_km(&self) -> f64 { self.orbit_km }
    pub fn period_days(&self) -> f64 { self.period_days }
    pub fn eccentricity(&self) -> f64 { self.eccentricity }
    pub fn inclination_deg(&self) -> f64 { self.inclination_deg }
    pub fn periapsis_arg_deg(&self) -> f64 { self.periapsis_arg_deg }
    pub fn visual_radius(&self) -> f64 { self.visual_radius }
    pub fn radius_km(&self) -> f64 { self.radius_km }

    /// Whether the body orbits the Sun directly.
    pub fn orbits_sun(&self) -> bool { self.class == BodyClass::Planet }
}
