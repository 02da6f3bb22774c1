// Aggregate repository port.
//
// Purpose
// - Load an aggregate by replaying its stream and save its pending events under the
//   optimistic concurrency check of the event store.
//
// Implementations
// - event_sourced: the authoritative path to the event store.
// - cache: a decorator serving hydrated aggregates from a bounded, scope-lifetime cache.
//
// Errors
// - A ConcurrencyConflict from the store is propagated unchanged. Repositories never
//   retry, since a retry must re-run domain logic on a freshly loaded aggregate.

use crate::shared::core::aggregate::{Aggregate, AggregateRoot};
use crate::shared::core::primitives::{AggregateId, Version};
use crate::shared::infrastructure::bus::EventHandlerFaulted;
use crate::shared::infrastructure::event_store::EventStoreError;
use async_trait::async_trait;
use thiserror::Error;

pub mod cache;
pub mod event_sourced;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("aggregate {aggregate_type} {aggregate_id} not found")]
    AggregateNotFound {
        aggregate_id: AggregateId,
        aggregate_type: &'static str,
    },

    #[error(transparent)]
    Store(#[from] EventStoreError),

    #[error("stream {aggregate_id} is out of order: expected version {expected}, found {found}")]
    StreamOutOfOrder {
        aggregate_id: AggregateId,
        expected: Version,
        found: Version,
    },

    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_concurrency_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AggregateNotFound { .. })
    }
}

/// Outcome of a successful save.
#[derive(Debug, Default)]
pub struct Committed {
    /// Stream version after the append.
    pub version: Version,
    /// Event handlers that faulted while the committed events were published.
    pub faults: Vec<EventHandlerFaulted>,
}

#[async_trait]
pub trait AggregateRepository: Send + Sync {
    /// Fails with AggregateNotFound when the stream has no events.
    async fn get<A: Aggregate>(&self, id: AggregateId) -> Result<AggregateRoot<A>, RepositoryError>;

    /// Appends the pending events with the aggregate's committed version as the expected
    /// version, then publishes each committed event once, in commit order.
    async fn save<A: Aggregate>(
        &self,
        aggregate: &mut AggregateRoot<A>,
    ) -> Result<Committed, RepositoryError>;
}
