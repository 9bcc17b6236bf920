use super::kepler::AU_TO_KM;
use crate::bodies::Body;

/// Days per Julian year, for period-from-semi-major-axis in solar orbits.
const DAYS_PER_YEAR: f64 = 365.25;

/// A minimum-energy (Hohmann) transfer between two solar orbits.
///
/// Derived on demand whenever the origin/target selection changes; never
/// persisted. Radii are treated as circular mean orbits, which is what
/// the catalog stores.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MissionTransfer {
    pub origin: String,
    pub target: String,
    /// Semi-major axis of the transfer ellipse, AU.
    pub semi_major_axis_au: f64,
    /// Eccentricity of the transfer ellipse.
    pub eccentricity: f64,
    /// Target lead angle at departure for arrival to coincide, degrees,
    /// normalized to (-180, 180].
    pub ideal_phase_angle_deg: f64,
    /// Half the transfer-ellipse period, days.
    pub transfer_time_days: f64,
}

impl MissionTransfer {
    /// Computes the transfer between two planets of the catalog.
    ///
    /// Returns `None` for identical bodies or bodies without a direct
    /// solar orbit (the star, moons): a transfer ellipse needs two
    /// distinct heliocentric radii.
    pub fn between(origin: &Body, target: &Body) -> Option<Self> {
        if origin.name() == target.name() || !origin.orbits_sun() || !target.orbits_sun() {
            return None;
        }

        let r1 = origin.orbit_km() / AU_TO_KM;
        let r2 = target.orbit_km() / AU_TO_KM;
        let semi_major_axis_au = (r1 + r2) / 2.0;
        let eccentricity = (r2 - r1).abs() / (r1 + r2);

        // Kepler's third law in solar units: T_years = a^(3/2).
        let transfer_time_days = 0.5 * DAYS_PER_YEAR * semi_major_axis_au.powf(1.5);
        let raw_phase = 180.0 - 360.0 * transfer_time_days / target.period_days();
        let mut ideal_phase_angle_deg = raw_phase.rem_euclid(360.0);
        if ideal_phase_angle_deg > 180.0 {
            ideal_phase_angle_deg -= 360.0;
        }

        Some(Self {
            origin: origin.name().to_string(),
            target: target.name().to_string(),
            semi_major_axis_au,
            eccentricity,
            ideal_phase_angle_deg,
            transfer_time_days,
        })
    }
}
