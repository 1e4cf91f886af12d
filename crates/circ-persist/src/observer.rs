//! `SaveObserver` — persists the registry whenever the throttle says so.

use circ_core::Tick;
use circ_sim::{CircuitRegistry, SaveOutcome, TickObserver};

use crate::RegionStore;

/// A [`TickObserver`] that answers every due save with
/// [`RegionStore::save_all`].
pub struct SaveObserver {
    store: RegionStore,
    saves: u64,
}

impl SaveObserver {
    pub fn new(store: RegionStore) -> Self {
        Self { store, saves: 0 }
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    /// Successful saves so far.
    pub fn saves(&self) -> u64 {
        self.saves
    }

    pub fn into_store(self) -> RegionStore {
        self.store
    }
}

impl TickObserver for SaveObserver {
    fn on_save_due(&mut self, _tick: Tick, registry: &CircuitRegistry) -> SaveOutcome {
        match self.store.save_all(registry) {
            Ok(_) => {
                self.saves += 1;
                SaveOutcome::Saved
            }
            Err(e) => SaveOutcome::Failed(e.to_string()),
        }
    }
}
