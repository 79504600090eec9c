use std::sync::Arc;

use crate::resolve::Resolver;
use crate::storage::PitchStore;

/// Shared handler state: the injected store handle plus lookup configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PitchStore>,
    pub resolver: Arc<Resolver>,
    pub roster: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(store: Arc<dyn PitchStore>, roster: Vec<String>) -> Self {
        Self {
            store,
            resolver: Arc::new(Resolver::default()),
            roster: Arc::new(roster),
        }
    }
}
