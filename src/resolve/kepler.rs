use crate::bodies::OrbitalElements;
use crate::util::Vec2D;
use std::f64::consts::TAU;
use strum_macros::Display;

/// Kilometers per astronomical unit.
pub const AU_TO_KM: f64 = 149_597_870.0;

/// Convergence tolerance on the Kepler residual `E - e·sin(E) - M`.
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Newton-Raphson iteration cap. Well-formed elliptical inputs converge
/// in a handful of steps; hitting the cap means the input was malformed.
const MAX_ITERATIONS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum ResolveError {
    #[strum(to_string = "Kepler solve did not converge (M={mean_anomaly}, e={eccentricity})")]
    NonConvergence { mean_anomaly: f64, eccentricity: f64 },
    #[strum(to_string = "degenerate orbital elements (period {period_days} days)")]
    DegenerateElements { period_days: f64 },
}

impl std::error::Error for ResolveError {}

/// Solves Kepler's equation `M = E - e·sin(E)` for the eccentric anomaly.
///
/// Newton-Raphson starting at `E = M`: circular orbits converge in a
/// single iteration, Mercury-class eccentricities in a few. Non-finite
/// steps (e.g. `e >= 1` driving the derivative through zero) run into the
/// iteration cap and surface as [`ResolveError::NonConvergence`].
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, ResolveError> {
    let mut e_anom = mean_anomaly;
    for _ in 0..MAX_ITERATIONS {
        let delta = (e_anom - eccentricity * e_anom.sin() - mean_anomaly)
            / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() <= KEPLER_TOLERANCE {
            return Ok(e_anom);
        }
    }
    Err(ResolveError::NonConvergence { mean_anomaly, eccentricity })
}

/// Planar orbit-plane position in AU for the given elements at
/// `time_days` past the document epoch.
///
/// `x = a(cos E - e)`, `y = a·√(1-e²)·sin E`, with the mean anomaly
/// advanced by the mean motion `2π / period`.
pub fn elements_to_xy(elements: &OrbitalElements, time_days: f64) -> Result<Vec2D<f64>, ResolveError> {
    if elements.period_days <= 0.0 {
        return Err(ResolveError::DegenerateElements { period_days: elements.period_days });
    }
    let mean_motion = TAU / elements.period_days;
    let mean_anomaly = elements.m_deg.to_radians() + mean_motion * time_days;
    let e_anom = solve_kepler(mean_anomaly, elements.eccentricity)?;

    let x = elements.a_au * (e_anom.cos() - elements.eccentricity);
    let y = elements.a_au * (1.0 - elements.eccentricity.powi(2)).sqrt() * e_anom.sin();
    Ok(Vec2D::new(x, y))
}
