use crate::horizons::{HTTPClient, HorizonsError};
use std::collections::HashMap;

/// Precomputed Keplerian elements for one body, as published by the
/// static-elements document.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in astronomical units.
    #[serde(rename = "a_AU")]
    pub a_au: f64,
    pub eccentricity: f64,
    /// Mean anomaly at the document epoch, in degrees.
    #[serde(rename = "M_deg")]
    pub m_deg: f64,
    pub period_days: f64,
}

#[derive(Debug, serde::Deserialize)]
struct ElementsDocument {
    planets: HashMap<String, OrbitalElements>,
}

/// Read-only table of static orbital elements, fetched once at startup.
///
/// Fetch failure is not fatal: the resolver treats a missing table (or a
/// missing body) as "tier unavailable" and falls through to the circular
/// fallback, so the visualization always renders.
#[derive(Debug)]
pub struct ElementsStore {
    planets: HashMap<String, OrbitalElements>,
}

impl ElementsStore {
    /// The empty table; every lookup misses.
    pub fn empty() -> Self {
        Self { planets: HashMap::new() }
    }

    /// Parses a static-elements JSON document of the form
    /// `{ "planets": { "<name>": { a_AU, eccentricity, M_deg, period_days } } }`.
    pub fn from_json_str(document: &str) -> serde_json::Result<Self> {
        let doc: ElementsDocument = serde_json::from_str(document)?;
        Ok(Self { planets: doc.planets })
    }

    /// Fetches the elements document from the given URL.
    pub async fn fetch(client: &HTTPClient, url: &str) -> Result<Self, HorizonsError> {
        let response = client.client().get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HorizonsError::Upstream { status: status.as_u16(), body });
        }
        let doc = response.json::<ElementsDocument>().await?;
        Ok(Self { planets: doc.planets })
    }

    /// Elements for a canonical body name, if the document carries it.
    pub fn get(&self, name: &str) -> Option<&OrbitalElements> {
        self.planets.get(name)
    }

    pub fn len(&self) -> usize { self.planets.len() }

    pub fn is_empty(&self) -> bool { self.planets.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "planets": {
            "Mars": { "a_AU": 1.52371, "eccentricity": 0.0934, "M_deg": 19.39, "period_days": 686.98 },
            "Earth": { "a_AU": 1.00000261, "eccentricity": 0.01671, "M_deg": 358.617, "period_days": 365.256 }
        }
    }"#;

    #[test]
    fn parses_the_published_document_shape() {
        let store = ElementsStore::from_json_str(DOCUMENT).unwrap();
        assert_eq!(store.len(), 2);
        let mars = store.get("Mars").unwrap();
        assert!((mars.a_au - 1.52371).abs() < 1e-9);
        assert!((mars.m_deg - 19.39).abs() < 1e-9);
    }

    #[test]
    fn missing_bodies_miss() {
        let store = ElementsStore::from_json_str(DOCUMENT).unwrap();
        assert!(store.get("Neptune").is_none());
        assert!(store.get("mars").is_none(), "element keys are exact, not case-folded");
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(ElementsStore::from_json_str("{}").is_err());
        assert!(ElementsStore::from_json_str(r#"{"planets": {"Mars": {"a_AU": "wide"}}}"#).is_err());
        assert!(ElementsStore::empty().is_empty());
    }
}
