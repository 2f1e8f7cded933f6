/// Shared application state
use noor_storage::QuranStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: QuranStore,
}

impl AppState {
    pub fn new(store: QuranStore) -> Self {
        Self { store }
    }
}
