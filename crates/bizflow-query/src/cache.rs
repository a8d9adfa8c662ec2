//! Registry of queries and the mutation contract

use crate::error::{QueryError, QueryResult};
use crate::key::QueryKey;
use crate::query::Query;
use async_trait::async_trait;
use bizflow_client::ClientResult;
use dashmap::DashMap;
use std::any::{Any, type_name};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Type-erased view of a query used for invalidation
#[async_trait]
trait Refetch: Send + Sync {
    fn invalidate(&self);

    async fn refetch(&self) -> QueryResult<()>;
}

#[async_trait]
impl<T> Refetch for Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn invalidate(&self) {
        Self::invalidate(self);
    }

    async fn refetch(&self) -> QueryResult<()> {
        Self::refetch(self).await.map(|_| ())
    }
}

#[derive(Clone)]
struct Entry {
    handle: Arc<dyn Refetch>,
    typed: Arc<dyn Any + Send + Sync>,
}

/// Shared registry of cached resources, keyed by [`QueryKey`]
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Clone, Default)]
pub struct QueryClient {
    entries: Arc<DashMap<QueryKey, Entry>>,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl QueryClient {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for `key`, registering `fetcher` on first use
    ///
    /// Later calls for the same key return the existing query and ignore
    /// their fetcher. Nothing is fetched until the query is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::TypeMismatch`] if the key was registered with a
    /// different data type.
    pub fn query<T, F, Fut>(&self, key: impl Into<QueryKey>, fetcher: F) -> QueryResult<Query<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let key = key.into();
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| {
                debug!(key = %key, "Query registered");
                let query = Query::new(key.clone(), fetcher);
                Entry {
                    handle: Arc::new(query.clone()),
                    typed: Arc::new(query),
                }
            })
            .value()
            .clone();

        entry
            .typed
            .downcast_ref::<Query<T>>()
            .cloned()
            .ok_or_else(|| QueryError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Registered query for `key`, if any
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::TypeMismatch`] if the key holds another type.
    pub fn get<T>(&self, key: &QueryKey) -> QueryResult<Option<Query<T>>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let Some(entry) = self.entries.get(key).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        entry
            .typed
            .downcast_ref::<Query<T>>()
            .cloned()
            .map(Some)
            .ok_or_else(|| QueryError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Mark the given keys stale; unknown keys are ignored
    pub fn invalidate(&self, keys: &[QueryKey]) {
        for entry in self.handles(keys) {
            entry.invalidate();
        }
    }

    /// Mark every key of a family stale
    pub fn invalidate_family(&self, family: &str) -> Vec<QueryKey> {
        let keys: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|e| e.key().family() == family)
            .map(|e| e.key().clone())
            .collect();
        self.invalidate(&keys);
        keys
    }

    /// Refetch the given keys concurrently
    ///
    /// # Errors
    ///
    /// Returns the first refetch failure; the other keys still complete.
    pub async fn refetch(&self, keys: &[QueryKey]) -> QueryResult<()> {
        let handles = self.handles(keys);
        let results = futures::future::join_all(handles.iter().map(|h| h.refetch())).await;
        results.into_iter().collect()
    }

    /// Run a mutation, then invalidate and refetch `keys` before returning
    ///
    /// The server acknowledgment is awaited first; cached data is never
    /// rewritten optimistically. A rejected mutation invalidates nothing. A
    /// refetch failure after a successful mutation is logged and left on the
    /// affected query's error state; the mutation itself still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Mutation`] if the mutation fails.
    pub async fn mutate<R, Fut>(&self, mutation: Fut, keys: &[QueryKey]) -> QueryResult<R>
    where
        Fut: Future<Output = ClientResult<R>>,
    {
        let output = match mutation.await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "Mutation failed, cache left untouched");
                return Err(QueryError::Mutation(Arc::new(err)));
            }
        };

        self.invalidate(keys);
        if let Err(err) = self.refetch(keys).await {
            warn!(error = %err, "Refetch after mutation failed");
        }
        info!(keys = keys.len(), "Mutation applied");
        Ok(output)
    }

    fn handles(&self, keys: &[QueryKey]) -> Vec<Arc<dyn Refetch>> {
        keys.iter()
            .filter_map(|key| self.entries.get(key).map(|e| Arc::clone(&e.handle)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn register(client: &QueryClient, key: &'static str, calls: &Arc<AtomicUsize>) -> Query<usize> {
        let calls = Arc::clone(calls);
        client
            .query(key, move || {
                let calls = Arc::clone(&calls);
                async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) }
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_same_key_returns_same_query() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = register(&client, "users", &calls);
        let second = register(&client, "users", &calls);
        first.load().await.unwrap();

        assert_eq!(second.data(), Some(1));
        assert_eq!(client.keys(), vec![QueryKey::from_static("users")]);
    }

    #[tokio::test]
    async fn test_type_mismatch() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        register(&client, "users", &calls);

        let result = client.query("users", || async { Ok(String::new()) });
        assert!(matches!(result, Err(QueryError::TypeMismatch { .. })));
        assert!(matches!(
            client.get::<String>(&QueryKey::from_static("users")),
            Err(QueryError::TypeMismatch { .. })
        ));
        assert!(client.get::<usize>(&QueryKey::from_static("orders-all")).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_family_only_touches_family() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let products = register(&client, "products-list", &calls);
        let orders = register(&client, "orders-all", &calls);
        products.load().await.unwrap();
        orders.load().await.unwrap();

        let invalidated = client.invalidate_family("products");

        assert_eq!(invalidated, vec![QueryKey::from_static("products-list")]);
        assert!(products.is_stale());
        assert!(!orders.is_stale());
    }
}
