use crate::bodies::PositionVector;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared holder of the latest live positions, keyed by canonical name.
///
/// The map is replaced wholesale on every refresh cycle: a body whose
/// fetch failed is simply absent afterwards, and readers fall through to
/// the lower resolution tiers on absence. Merging old entries in was
/// rejected — absence is observable, silently stale data is not.
#[derive(Debug, Default)]
pub struct LivePositionStore {
    positions: RwLock<HashMap<String, PositionVector>>,
    /// Whether live mode is currently on (the refresh loop is running).
    live: AtomicBool,
}

impl LivePositionStore {
    pub fn new() -> Self {
        Self { positions: RwLock::new(HashMap::new()), live: AtomicBool::new(false) }
    }

    /// Swaps in the result map of a refresh cycle.
    pub fn replace(&self, positions: HashMap<String, PositionVector>) {
        if let Ok(mut guard) = self.positions.write() {
            *guard = positions;
        }
    }

    /// Latest live position for a canonical body name, if any.
    pub fn get(&self, name: &str) -> Option<PositionVector> {
        self.positions.read().ok()?.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.read().map_or(0, |guard| guard.len())
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn set_live(&self, on: bool) {
        self.live.store(on, Ordering::Relaxed);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_wholesale_not_a_merge() {
        let store = LivePositionStore::new();
        store.replace(HashMap::from([
            ("Mars".to_string(), PositionVector::new(1.0, 0.0, 0.0)),
            ("Venus".to_string(), PositionVector::new(0.0, 1.0, 0.0)),
        ]));
        store.replace(HashMap::from([(
            "Mars".to_string(),
            PositionVector::new(2.0, 0.0, 0.0),
        )]));

        assert_eq!(store.len(), 1);
        assert!((store.get("Mars").unwrap().x_km - 2.0).abs() < f64::EPSILON);
        assert!(store.get("Venus").is_none(), "failed bodies disappear instead of going stale");
    }

    #[test]
    fn live_flag_round_trips() {
        let store = LivePositionStore::new();
        assert!(!store.is_live());
        store.set_live(true);
        assert!(store.is_live());
        store.set_live(false);
        assert!(!store.is_live());
    }
}
