//! Caching layer for route queries.
//!
//! The network never changes after loading, so a route outcome stays valid
//! for the life of the process. The TTL only bounds memory held by rarely
//! repeated queries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::task::JoinError;
use tracing::trace;

use crate::domain::StopId;
use crate::network::Network;
use crate::router::RouteOutcome;

/// Cache key for routes: (origin, destination).
type RouteKey = (StopId, StopId);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of resolved routes, shared by all request handlers.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<RouteOutcome>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached outcome.
    pub async fn get(&self, from: StopId, to: StopId) -> Option<Arc<RouteOutcome>> {
        self.routes.get(&(from, to)).await
    }

    /// Insert an outcome into the cache.
    pub async fn insert(&self, from: StopId, to: StopId, outcome: Arc<RouteOutcome>) {
        self.routes.insert((from, to), outcome).await;
    }

    /// Return the cached outcome, resolving and caching it on a miss.
    ///
    /// The search runs on the blocking thread pool. Both handles must
    /// belong to `network`. Fails only if the search task panicked.
    pub async fn get_or_resolve(
        &self,
        network: &Arc<Network>,
        from: StopId,
        to: StopId,
    ) -> Result<Arc<RouteOutcome>, JoinError> {
        if let Some(cached) = self.get(from, to).await {
            trace!(%from, %to, "route cache hit");
            return Ok(cached);
        }

        let network = Arc::clone(network);
        let outcome =
            tokio::task::spawn_blocking(move || Arc::new(network.resolver().resolve_ids(from, to)))
                .await?;
        self.insert(from, to, outcome.clone()).await;
        trace!(%from, %to, entries = self.entry_count(), "route cached");
        Ok(outcome)
    }

    /// Number of cached outcomes.
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = r#"{
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
             "road_distances": {"B": 1000}},
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 1.0},
            {"type": "Stop", "name": "C", "latitude": 1.0, "longitude": 1.0},
            {"type": "Bus", "name": "L1", "stops": ["A", "B"], "is_roundtrip": false}
        ],
        "routing_settings": {"bus_wait_time": 2, "bus_velocity": 60}
    }"#;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[tokio::test]
    async fn miss_resolves_and_stores() {
        let network = Arc::new(Network::from_json(NETWORK).unwrap());
        let cache = RouteCache::new(&CacheConfig::default());
        let (a, b) = (StopId(0), StopId(1));

        assert!(cache.get(a, b).await.is_none());
        let outcome = cache.get_or_resolve(&network, a, b).await.unwrap();
        let itinerary = outcome.itinerary().unwrap();
        assert!((itinerary.total_time - 3.0).abs() < 1e-9);

        let cached = cache.get(a, b).await.unwrap();
        assert!(Arc::ptr_eq(&outcome, &cached));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_misses_resolve_off_the_runtime() {
        let network = Arc::new(Network::from_json(NETWORK).unwrap());
        let cache = Arc::new(RouteCache::new(&CacheConfig::default()));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let (network, cache) = (network.clone(), cache.clone());
                let (from, to) = if i % 2 == 0 {
                    (StopId(0), StopId(1))
                } else {
                    (StopId(1), StopId(0))
                };
                tokio::spawn(async move { cache.get_or_resolve(&network, from, to).await })
            })
            .collect();

        for task in tasks {
            let outcome = task.await.unwrap().unwrap();
            assert!(outcome.itinerary().is_some());
        }
        cache.routes.run_pending_tasks().await;
        assert_eq!(cache.entry_count(), 2);
    }

    #[tokio::test]
    async fn no_route_is_cached_too() {
        let network = Arc::new(Network::from_json(NETWORK).unwrap());
        let cache = RouteCache::new(&CacheConfig::default());
        let (a, c) = (StopId(0), StopId(2));

        let first = cache.get_or_resolve(&network, a, c).await.unwrap();
        assert_eq!(*first, RouteOutcome::NoRoute);
        let second = cache.get_or_resolve(&network, a, c).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn direction_is_part_of_the_key() {
        let network = Arc::new(Network::from_json(NETWORK).unwrap());
        let cache = RouteCache::new(&CacheConfig::default());
        let (a, b) = (StopId(0), StopId(1));

        cache.get_or_resolve(&network, a, b).await.unwrap();
        assert!(cache.get(b, a).await.is_none());
    }
}
