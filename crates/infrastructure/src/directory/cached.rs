use async_trait::async_trait;
use dashmap::DashMap;
use endpoint_dns_application::ports::EndpointResolver;
use endpoint_dns_domain::DomainError;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

static EMPTY_ADDRESSES: LazyLock<Arc<Vec<String>>> = LazyLock::new(|| Arc::new(vec![]));

struct CacheEntry {
    addresses: Arc<Vec<String>>,
    created_at: Instant,
}

type InflightSender = Arc<watch::Sender<Option<Arc<Vec<String>>>>>;

struct InflightLeaderGuard {
    inflight: Arc<DashMap<Arc<str>, InflightSender, FxBuildHasher>>,
    key: Arc<str>,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}

/// Bounded, time-expiring, single-flight cache in front of the
/// directory.
///
/// Concurrent misses for the same key elect one leader; everyone else
/// awaits the leader's result through a watch channel, so the directory
/// sees at most one in-flight lookup per key across all workers. A
/// failed or timed-out lookup is cached as an empty list for the full
/// TTL: "no addresses" and "lookup failed" are observably identical,
/// and the TTL bounds the retry rate.
///
/// In-flight state lives outside the LRU store, so capacity eviction
/// can never drop a computation that is still running.
pub struct CachedEndpointResolver {
    inner: Arc<dyn EndpointResolver>,
    entries: Mutex<LruCache<Arc<str>, CacheEntry, FxBuildHasher>>,
    ttl: Duration,
    lookup_timeout: Duration,
    inflight: Arc<DashMap<Arc<str>, InflightSender, FxBuildHasher>>,
}

impl CachedEndpointResolver {
    pub fn new(
        inner: Arc<dyn EndpointResolver>,
        ttl: Duration,
        max_entries: usize,
        lookup_timeout: Duration,
    ) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            ttl,
            lookup_timeout,
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    fn check_cache(&self, key: &str) -> Option<Arc<Vec<String>>> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        let entry = entries.get(key)?;
        if entry.created_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.addresses))
        } else {
            None
        }
    }

    fn store(&self, key: &Arc<str>, addresses: Arc<Vec<String>>) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.push(
            Arc::clone(key),
            CacheEntry {
                addresses,
                created_at: Instant::now(),
            },
        );
    }

    fn register_or_join_inflight(
        &self,
        key: &Arc<str>,
    ) -> (bool, watch::Receiver<Option<Arc<Vec<String>>>>) {
        match self.inflight.entry(Arc::clone(key)) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None::<Arc<Vec<String>>>);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn resolve_as_follower(
        &self,
        key: &Arc<str>,
        mut rx: watch::Receiver<Option<Arc<Vec<String>>>>,
    ) -> Result<Arc<Vec<String>>, DomainError> {
        if rx.changed().await.is_ok() {
            if let Some(result) = rx.borrow().clone() {
                return Ok(result);
            }
        }

        if let Some(result) = rx.borrow().clone() {
            return Ok(result);
        }

        // The leader vanished without publishing; fall back to the
        // cache, then to resolving ourselves.
        if let Some(cached) = self.check_cache(key) {
            return Ok(cached);
        }

        self.resolve_endpoint(key).await
    }

    async fn resolve_as_leader(&self, key: Arc<str>) -> Result<Arc<Vec<String>>, DomainError> {
        debug!(endpoint = %key, "Cache MISS");

        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: Arc::clone(&key),
        };

        let result = tokio::time::timeout(self.lookup_timeout, self.inner.resolve_endpoint(&key)).await;

        let addresses = match result {
            Ok(Ok(addresses)) => addresses,
            Ok(Err(e)) => {
                warn!(endpoint = %key, error = %e, "Directory lookup failed, caching empty result");
                Arc::clone(&EMPTY_ADDRESSES)
            }
            Err(_) => {
                warn!(
                    endpoint = %key,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Directory lookup timed out, caching empty result"
                );
                Arc::clone(&EMPTY_ADDRESSES)
            }
        };

        self.store(&key, Arc::clone(&addresses));

        if let Some((_, tx)) = self.inflight.remove(&key) {
            let _ = tx.send(Some(Arc::clone(&addresses)));
        }

        drop(guard);
        Ok(addresses)
    }
}

#[async_trait]
impl EndpointResolver for CachedEndpointResolver {
    async fn resolve_endpoint(&self, name: &str) -> Result<Arc<Vec<String>>, DomainError> {
        if let Some(cached) = self.check_cache(name) {
            debug!(endpoint = %name, "Cache HIT");
            return Ok(cached);
        }

        let key: Arc<str> = Arc::from(name);
        let (is_leader, rx) = self.register_or_join_inflight(&key);

        if !is_leader {
            return self.resolve_as_follower(&key, rx).await;
        }

        self.resolve_as_leader(key).await
    }
}
