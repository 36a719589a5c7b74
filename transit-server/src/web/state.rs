//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RouteCache};
use crate::network::Network;

/// Shared application state.
///
/// The network is immutable after loading, so handlers read it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Catalogue, settings and travel-time graph
    pub network: Arc<Network>,

    /// Memoised route outcomes
    pub routes: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, cache_config: &CacheConfig) -> Self {
        Self {
            network: Arc::new(network),
            routes: Arc::new(RouteCache::new(cache_config)),
        }
    }
}
