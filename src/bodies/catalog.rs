use super::body::{Body, BodyClass};

/// The canonical table of bodies the pipeline knows about.
///
/// Immutable reference data, built once at startup. Lookup is
/// case-insensitive against the canonical names; anything else is an
/// unknown body and must be rejected by the caller.
#[derive(Debug)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
}

impl BodyCatalog {
    pub fn new() -> Self {
        Self { bodies: catalog_table() }
    }

    /// Resolves a user-supplied name to a catalog entry, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Body> {
        let trimmed = name.trim();
        self.bodies.iter().find(|b| b.name().eq_ignore_ascii_case(trimmed))
    }

    /// All bodies polled by the live fetcher, planets before moons.
    ///
    /// The Sun is cataloged for resolution but not tracked: its
    /// heliocentric position is the origin by definition.
    pub fn tracked(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.class() != BodyClass::Star)
    }

    pub fn planets(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.class() == BodyClass::Planet)
    }

    pub fn moons_of(&self, planet: &str) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.parent() == Some(planet))
    }

    pub fn len(&self) -> usize { self.bodies.len() }

    pub fn is_empty(&self) -> bool { self.bodies.is_empty() }
}

impl Default for BodyCatalog {
    fn default() -> Self { Self::new() }
}

/// Orbital parameters are mean values; physical radii are volumetric mean
/// radii. Command codes are the upstream ephemeris identifiers for the
/// major-body centers (`<n>99` planet centers, `5xx`/`6xx` satellites).
fn catalog_table() -> Vec<Body> {
    use BodyClass::{Moon, Planet, Star};
    vec![
        Body::new("Sun", Star, None, "10", 0.0, 0.0, 0.0, 0.0, 0.0, 20.0, 696_000.0),
        Body::new("Mercury", Planet, None, "199", 58e6, 88.0, 0.2056, 7.00, 252.25, 3.0, 2_439.7),
        Body::new("Venus", Planet, None, "299", 108e6, 225.0, 0.0068, 3.39, 181.98, 5.0, 6_051.8),
        Body::new("Earth", Planet, None, "399", 150e6, 365.0, 0.0167, 0.00, 102.95, 5.0, 6_371.0),
        Body::new("Mars", Planet, None, "499", 228e6, 687.0, 0.0934, 1.85, 336.04, 4.0, 3_389.5),
        Body::new("Jupiter", Planet, None, "599", 778e6, 4_333.0, 0.0484, 1.31, 14.75, 10.0, 69_911.0),
        Body::new("Saturn", Planet, None, "699", 1_427e6, 10_759.0, 0.0542, 2.48, 92.59, 8.0, 58_232.0),
        Body::new("Uranus", Planet, None, "799", 2_871e6, 30_687.0, 0.0472, 0.77, 170.96, 7.0, 25_362.0),
        Body::new("Neptune", Planet, None, "899", 4_495e6, 60_190.0, 0.0086, 1.77, 44.97, 7.0, 24_622.0),
        Body::new("Moon", Moon, Some("Earth"), "301", 384_400.0, 27.3, 0.0549, 5.15, 318.15, 2.0, 1_737.4),
        Body::new("Io", Moon, Some("Jupiter"), "501", 421_700.0, 1.77, 0.0041, 0.05, 84.13, 2.0, 1_821.6),
        Body::new("Europa", Moon, Some("Jupiter"), "502", 671_100.0, 3.55, 0.0094, 0.47, 88.97, 2.0, 1_560.8),
        Body::new("Ganymede", Moon, Some("Jupiter"), "503", 1_070_400.0, 7.15, 0.0013, 0.20, 192.42, 3.0, 2_634.1),
        Body::new("Callisto", Moon, Some("Jupiter"), "504", 1_882_700.0, 16.7, 0.0074, 0.19, 52.64, 3.0, 2_410.3),
        Body::new("Titan", Moon, Some("Saturn"), "606", 1_221_870.0, 15.9, 0.0288, 0.35, 185.67, 3.0, 2_574.7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = BodyCatalog::new();
        for name in ["Mars", "mars", "MARS", " mArS "] {
            let body = catalog.lookup(name).unwrap();
            assert_eq!(body.name(), "Mars");
            assert_eq!(body.command_code(), "499");
        }
    }

    #[test]
    fn unknown_names_miss() {
        let catalog = BodyCatalog::new();
        assert!(catalog.lookup("Pluto").is_none());
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("4 Vesta").is_none());
    }

    #[test]
    fn tracked_set_covers_planets_and_moons_but_not_the_sun() {
        let catalog = BodyCatalog::new();
        let tracked: Vec<_> = catalog.tracked().map(Body::name).collect();
        assert_eq!(tracked.len(), 14);
        assert!(!tracked.contains(&"Sun"));
        assert!(tracked.contains(&"Neptune"));
        assert!(tracked.contains(&"Titan"));
    }

    #[test]
    fn moons_reference_cataloged_parents() {
        let catalog = BodyCatalog::new();
        for moon in catalog.tracked().filter(|b| b.class() == BodyClass::Moon) {
            let parent = moon.parent().unwrap();
            assert!(catalog.lookup(parent).is_some(), "{} orphaned", moon.name());
        }
        assert_eq!(catalog.moons_of("Jupiter").count(), 4);
    }
}
