//! Query cache
//!
//! Results of public read queries are kept for a short while, keyed by the endpoint and its
//! parameters. Concurrent requests for the same key share one in-flight load.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

/// Upper bound of cached results
const MAX_CAPACITY: u64 = 1_000;

/// Cache for serialized query results
#[derive(Clone)]
pub struct QueryCache {
    /// `None` when caching is disabled
    inner: Option<Cache<String, Value>>,
}

impl QueryCache {
    /// Create a cache where results go stale after `time_to_live`
    ///
    /// A zero duration disables the cache, every call fetches
    pub fn new(time_to_live: Duration) -> Self {
        if time_to_live.is_zero() {
            return Self::disabled();
        }

        let inner = Cache::builder()
            .max_capacity(MAX_CAPACITY)
            .time_to_live(time_to_live)
            .build();

        Self { inner: Some(inner) }
    }

    /// A cache that never keeps anything
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Get the cached value of `key`, or fetch it
    ///
    /// Failed fetches are handed to every caller waiting on them, but are never cached
    pub async fn get_or_fetch<F, E>(&self, key: &str, fetch: F) -> Result<Value, Arc<E>>
    where
        F: Future<Output = Result<Value, E>>,
        E: Send + Sync + 'static,
    {
        let Some(cache) = &self.inner else {
            return fetch.await.map_err(Arc::new);
        };

        cache.try_get_with_by_ref(key, fetch).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;

    async fn counted(counter: &AtomicUsize, fail: bool) -> Result<Value, String> {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::task::yield_now().await;

        if fail {
            Err("Connection error: gone".to_string())
        } else {
            Ok(json!({ "count": count }))
        }
    }

    #[tokio::test]
    async fn test_cached_value_is_reused() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);

        let first = cache.get_or_fetch("a", counted(&counter, false)).await.unwrap();
        let second = cache.get_or_fetch("a", counted(&counter, false)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(1, counter.load(Ordering::SeqCst));

        cache.get_or_fetch("b", counted(&counter, false)).await.unwrap();
        assert_eq!(2, counter.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_shared() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);

        let (first, second) = tokio::join!(
            cache.get_or_fetch("a", counted(&counter, false)),
            cache.get_or_fetch("a", counted(&counter, false)),
        );

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(1, counter.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);

        let error = cache.get_or_fetch("a", counted(&counter, true)).await;
        assert_eq!("Connection error: gone", error.unwrap_err().as_str());

        let value = cache.get_or_fetch("a", counted(&counter, false)).await.unwrap();
        assert_eq!(json!({ "count": 2 }), value);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let cache = QueryCache::new(Duration::ZERO);
        let counter = AtomicUsize::new(0);

        cache.get_or_fetch("a", counted(&counter, false)).await.unwrap();
        cache.get_or_fetch("a", counted(&counter, false)).await.unwrap();

        assert_eq!(2, counter.load(Ordering::SeqCst));
    }
}
