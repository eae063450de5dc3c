use serde::{Deserialize, Serialize};
use skytrips_core::{KvStore, Location};
use std::sync::Arc;
use tracing::warn;

pub const CURRENCY_KEY: &str = "selectedCurrency";
pub const AIRPORTS_KEY: &str = "skytrips_airports";

pub const DEFAULT_CURRENCY: &str = "USD";

/// The last committed origin/destination pair, used to prefill the form on
/// reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportPair {
    pub origin: Location,
    pub destination: Location,
}

/// Small per-user preferences living in the same key-value store as the
/// recency list. Absence of any key means "use defaults".
pub struct Preferences<S: KvStore> {
    store: Arc<S>,
}

impl<S: KvStore> Preferences<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn currency(&self) -> String {
        self.store
            .get(CURRENCY_KEY)
            .filter(|currency| !currency.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    pub fn set_currency(&self, currency: &str) {
        self.store.set(CURRENCY_KEY, currency);
    }

    pub fn airport_pair(&self) -> Option<AirportPair> {
        let raw = self.store.get(AIRPORTS_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!("discarding corrupt airport pair: {}", err);
                None
            }
        }
    }

    pub fn save_airport_pair(&self, origin: &Location, destination: &Location) {
        let pair = AirportPair {
            origin: origin.clone(),
            destination: destination.clone(),
        };
        match serde_json::to_string(&pair) {
            Ok(json) => self.store.set(AIRPORTS_KEY, &json),
            Err(err) => warn!("failed to serialize airport pair: {}", err),
        }
    }
}
