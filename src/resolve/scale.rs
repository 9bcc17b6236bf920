/// Logarithmic distance-to-pixel mapping.
///
/// Real orbit radii span two orders of magnitude; a linear scale would
/// pin the inner planets onto the Sun. The log interpolation compresses
/// radial distance while the resolver keeps the true angle, so relative
/// ordering stays readable.
#[derive(Debug, Clone, Copy)]
pub struct DistanceScale {
    domain_km: (f64, f64),
    range_px: (f64, f64),
}

impl DistanceScale {
    pub const fn new(domain_km: (f64, f64), range_px: (f64, f64)) -> Self {
        Self { domain_km, range_px }
    }

    /// Maps a distance in km to display pixels.
    ///
    /// The log of a non-positive distance is undefined; such inputs pin
    /// to the near edge of the range. Distances outside the domain
    /// extrapolate, matching the d3 scale the visualization started from.
    pub fn project(&self, distance_km: f64) -> f64 {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return self.range_px.0;
        }
        let (d0, d1) = self.domain_km;
        let (r0, r1) = self.range_px;
        let t = (distance_km.ln() - d0.ln()) / (d1.ln() - d0.ln());
        r0 + t * (r1 - r0)
    }
}

/// The two scales the visualization renders with: heliocentric planet
/// orbits and planet-local moon orbits.
#[derive(Debug, Clone, Copy)]
pub struct OrbitScales {
    pub planet: DistanceScale,
    pub moon: DistanceScale,
}

impl OrbitScales {
    /// Domains cover Mercury through Neptune and the tracked moons;
    /// ranges keep Mercury clear of the Sun disc and Neptune on canvas.
    pub const fn visualization_default() -> Self {
        Self {
            planet: DistanceScale::new((5e7, 4.5e9), (30.0, 300.0)),
            moon: DistanceScale::new((1e5, 4e6), (8.0, 25.0)),
        }
    }
}
