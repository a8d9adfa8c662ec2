//! A single cached resource
//!
//! At most one fetch per [`Query`] is in flight at a time; concurrent
//! observers await the same shared future. Each fetch remembers the
//! invalidation generation it started in, so [`Query::refetch`] can tell a
//! fetch that predates an invalidation from a fresh one.

use crate::error::{QueryError, QueryResult};
use crate::key::QueryKey;
use bizflow_client::{ClientError, ClientResult};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;
type SharedFetch<T> = Shared<BoxFuture<'static, Result<T, Arc<ClientError>>>>;

/// Coarse state of a query, in the order views check it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The last fetch failed
    Error,
    /// Data is available
    Ready,
}

/// Snapshot of a query as seen by a view
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Last successfully fetched value
    pub data: Option<T>,
    /// Whether a fetch is outstanding
    pub is_loading: bool,
    /// Error of the last fetch, cleared by the next success
    pub error: Option<Arc<ClientError>>,
    /// When `data` was fetched
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            updated_at: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Current status
    pub const fn status(&self) -> QueryStatus {
        if self.is_loading {
            QueryStatus::Loading
        } else if self.error.is_some() {
            QueryStatus::Error
        } else if self.data.is_some() {
            QueryStatus::Ready
        } else {
            QueryStatus::Idle
        }
    }
}

struct Cached<T> {
    view: QueryState<T>,
    fetched_generation: Option<u64>,
}

struct InFlight<T> {
    id: u64,
    generation: u64,
    future: SharedFetch<T>,
}

struct Inner<T> {
    key: QueryKey,
    fetcher: Fetcher<T>,
    cached: RwLock<Cached<T>>,
    in_flight: Mutex<Option<InFlight<T>>>,
    generation: AtomicU64,
    next_fetch: AtomicU64,
}

impl<T: Clone> Inner<T> {
    /// Record the outcome of fetch `id`; runs exactly once per fetch
    fn settle(&self, id: u64, generation: u64, result: &Result<T, Arc<ClientError>>) {
        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|f| f.id == id) {
            *slot = None;
        }

        let mut cached = self.cached.write();
        cached.view.is_loading = slot.is_some();
        match result {
            Ok(data) => {
                cached.view.data = Some(data.clone());
                cached.view.error = None;
                cached.view.updated_at = Some(Utc::now());
                cached.fetched_generation = Some(generation);
                debug!(key = %self.key, generation, "Query settled");
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Fetch failed, keeping cached data");
                cached.view.error = Some(Arc::clone(err));
            }
        }
    }
}

/// Handle to one cached resource
pub struct Query<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("key", &self.inner.key)
            .field("generation", &self.inner.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a standalone query; most callers go through [`crate::QueryClient`]
    pub fn new<F, Fut>(key: QueryKey, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || fetcher().boxed());
        Self {
            inner: Arc::new(Inner {
                key,
                fetcher,
                cached: RwLock::new(Cached {
                    view: QueryState::default(),
                    fetched_generation: None,
                }),
                in_flight: Mutex::new(None),
                generation: AtomicU64::new(0),
                next_fetch: AtomicU64::new(0),
            }),
        }
    }

    /// Cache key
    pub fn key(&self) -> &QueryKey {
        &self.inner.key
    }

    /// Snapshot of `{data, is_loading, error}`
    pub fn state(&self) -> QueryState<T> {
        self.inner.cached.read().view.clone()
    }

    /// Cached value, fresh or not
    pub fn data(&self) -> Option<T> {
        self.inner.cached.read().view.data.clone()
    }

    /// Whether the cached value predates the last invalidation (or is absent)
    pub fn is_stale(&self) -> bool {
        self.fresh_data().is_none()
    }

    /// Cached value if it is fresh, otherwise fetch it
    ///
    /// Concurrent callers share a single request.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Fetch`] if the fetch fails.
    pub async fn load(&self) -> QueryResult<T> {
        if let Some(data) = self.fresh_data() {
            return Ok(data);
        }
        self.fetch().await
    }

    /// Start a fetch for stale data without waiting for it
    ///
    /// Outside a Tokio runtime the fetch only runs once someone awaits it.
    pub fn prefetch(&self) {
        if self.fresh_data().is_none() {
            let _ = self.join_or_start();
        }
    }

    /// Join the outstanding fetch, or start one
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Fetch`] if the fetch fails.
    pub async fn fetch(&self) -> QueryResult<T> {
        let (_, future) = self.join_or_start();
        future.await.map_err(QueryError::Fetch)
    }

    /// Fetch until the result reflects every invalidation made before the call
    ///
    /// An outstanding fetch that started before the last invalidation is
    /// awaited and then followed by a new one.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Fetch`] if the fresh fetch fails. Cached data is
    /// left untouched in that case.
    pub async fn refetch(&self) -> QueryResult<T> {
        let target = self.generation();
        loop {
            let (started_in, future) = self.join_or_start();
            let result = future.await;
            if started_in >= target {
                return result.map_err(QueryError::Fetch);
            }
            debug!(key = %self.inner.key, "Joined fetch predates invalidation, fetching again");
        }
    }

    /// Mark the cached value stale; the next load or refetch goes to the server
    pub fn invalidate(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(key = %self.inner.key, generation, "Query invalidated");
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn fresh_data(&self) -> Option<T> {
        let current = self.generation();
        let cached = self.inner.cached.read();
        if cached.fetched_generation == Some(current) {
            cached.view.data.clone()
        } else {
            None
        }
    }

    fn join_or_start(&self) -> (u64, SharedFetch<T>) {
        let mut slot = self.inner.in_flight.lock();
        if let Some(in_flight) = slot.as_ref() {
            return (in_flight.generation, in_flight.future.clone());
        }

        let generation = self.generation();
        let id = self.inner.next_fetch.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::clone(&self.inner);
        let future = async move {
            let result = (inner.fetcher)().await.map_err(Arc::new);
            inner.settle(id, generation, &result);
            result
        }
        .boxed()
        .shared();

        *slot = Some(InFlight {
            id,
            generation,
            future: future.clone(),
        });
        self.inner.cached.write().view.is_loading = true;
        drop(slot);

        debug!(key = %self.inner.key, generation, "Fetch started");

        // Keep the request alive when every observer goes away
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(future.clone());
        }

        (generation, future)
    }
}
