//! Resolves which coordinate to report weather for

use tracing::{debug, warn};

use crate::data::Coordinate;
use crate::store::LocalStore;

/// Used when no coordinate was given and none is remembered
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    lat: 1.3521,
    lng: 103.8198,
};

/// Store key for the most recently used coordinate
pub const LAST_LOCATION_KEY: &str = "lastLocation";

/// Picks the explicit, remembered or default coordinate
///
/// Without a store nothing is remembered and storage failures never block
/// resolution.
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    store: Option<LocalStore>,
}

impl LocationResolver {
    pub fn new(store: Option<LocalStore>) -> Self {
        Self { store }
    }

    /// Explicit coordinate first (and remember it), then the stored one, then Singapore
    pub fn resolve(&self, explicit: Option<Coordinate>) -> Coordinate {
        if let Some(coordinate) = explicit {
            if let Some(store) = &self.store {
                if let Err(error) = store.set(LAST_LOCATION_KEY, &coordinate) {
                    warn!(%error, "could not remember location");
                }
            }
            return coordinate;
        }

        match self
            .store
            .as_ref()
            .and_then(|store| store.get::<Coordinate>(LAST_LOCATION_KEY))
        {
            Some(coordinate) => {
                debug!(lat = coordinate.lat, lng = coordinate.lng, "using remembered location");
                coordinate
            }
            None => DEFAULT_COORDINATE,
        }
    }

    /// Drops the remembered coordinate; returns whether one existed
    pub fn forget(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store.remove(LAST_LOCATION_KEY) {
            Ok(removed) => removed,
            Err(error) => {
                warn!(%error, "could not forget location");
                false
            }
        }
    }
}
