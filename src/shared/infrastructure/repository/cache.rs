// Caching decorator over an aggregate repository.
//
// Purpose
// - Serve hydrated aggregates from a bounded cache to avoid replaying streams.
//
// Responsibilities
// - get: on a hit, compare the cached version with the stream version in the store; when
//   the store is ahead the entry is evicted and the aggregate is reloaded. On a miss the
//   inner repository loads it and the result is cached.
// - save: the inner repository commits first. Only a successful commit overwrites the
//   entry with the post-save state. A failed save leaves the entry as it was.
//
// Lifetime
// - One cache per scope (session). It never outlives the request that filled it.

use crate::shared::core::aggregate::{Aggregate, AggregateRoot};
use crate::shared::core::primitives::{AggregateId, Version};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::repository::event_sourced::EventSourcedRepository;
use crate::shared::infrastructure::repository::{AggregateRepository, Committed, RepositoryError};
use async_trait::async_trait;
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_CACHE_CAPACITY: usize = 128;

struct CacheEntry {
    version: Version,
    // AggregateRoot<A> without pending events.
    snapshot: Box<dyn Any + Send + Sync>,
}

struct AggregateCache {
    capacity: usize,
    entries: HashMap<AggregateId, CacheEntry>,
    insertion_order: VecDeque<AggregateId>,
}

impl AggregateCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    fn get<A: Aggregate>(&self, id: AggregateId) -> Option<AggregateRoot<A>> {
        self.entries
            .get(&id)?
            .snapshot
            .downcast_ref::<AggregateRoot<A>>()
            .cloned()
    }

    fn insert<A: Aggregate>(&mut self, root: &AggregateRoot<A>) {
        if self.capacity == 0 {
            return;
        }
        let id = root.id();
        let entry = CacheEntry {
            version: root.version(),
            snapshot: Box::new(root.clone()),
        };
        if self.entries.insert(id, entry).is_none() {
            self.insertion_order.push_back(id);
        }
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            debug!(aggregate_id = %oldest, "cache entry evicted for capacity");
        }
    }

    fn evict(&mut self, id: AggregateId) {
        if self.entries.remove(&id).is_some() {
            self.insertion_order.retain(|cached| *cached != id);
        }
    }

    fn version(&self, id: AggregateId) -> Option<Version> {
        self.entries.get(&id).map(|entry| entry.version)
    }
}

pub struct CacheRepository<R = EventSourcedRepository>
where
    R: AggregateRepository,
{
    inner: R,
    event_store: Arc<dyn EventStore>,
    cache: Mutex<AggregateCache>,
}

impl<R> CacheRepository<R>
where
    R: AggregateRepository,
{
    pub fn new(inner: R, event_store: Arc<dyn EventStore>) -> Self {
        Self::with_capacity(inner, event_store, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: R, event_store: Arc<dyn EventStore>, capacity: usize) -> Self {
        Self {
            inner,
            event_store,
            cache: Mutex::new(AggregateCache::new(capacity)),
        }
    }

    pub async fn cached_version(&self, id: AggregateId) -> Option<Version> {
        self.cache.lock().await.version(id)
    }
}

#[async_trait]
impl<R> AggregateRepository for CacheRepository<R>
where
    R: AggregateRepository,
{
    async fn get<A: Aggregate>(&self, id: AggregateId) -> Result<AggregateRoot<A>, RepositoryError> {
        let cached = self.cache.lock().await.get::<A>(id);
        if let Some(root) = cached {
            let current = self.event_store.version(id).await?;
            if current == root.version() {
                debug!(aggregate_id = %id, version = current, "cache hit");
                return Ok(root);
            }
            debug!(aggregate_id = %id, cached = root.version(), current, "cache entry stale");
            self.cache.lock().await.evict(id);
        }

        let root = self.inner.get::<A>(id).await?;
        self.cache.lock().await.insert(&root);
        Ok(root)
    }

    async fn save<A: Aggregate>(
        &self,
        aggregate: &mut AggregateRoot<A>,
    ) -> Result<Committed, RepositoryError> {
        let committed = self.inner.save(aggregate).await?;
        self.cache.lock().await.insert(aggregate);
        Ok(committed)
    }
}
