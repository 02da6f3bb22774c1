// In memory implementation of the EventStore port.
//
// Purpose
// - Reference store for the runtime, its tests and local development.
//
// Responsibilities
// - Store events per stream in memory.
// - Enforce optimistic concurrency: the version check and the append happen under one
//   write guard, so of two writers with the same expected version exactly one wins.
//
// Test hooks
// - toggle_offline makes every call fail with a backend error.
// - set_delay_append_ms sleeps before the compare-and-append so concurrent writers interleave.

use crate::shared::core::primitives::{AggregateId, Version};
use crate::shared::infrastructure::event_store::{
    EventStore, EventStoreError, NewEvent, StoredEvent,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEventStore {
    streams: RwLock<HashMap<AggregateId, Vec<StoredEvent>>>,
    is_offline: bool,
    delay_append_ms: AtomicU64,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::Relaxed);
    }

    fn ensure_online(&self) -> Result<(), EventStoreError> {
        if self.is_offline {
            return Err(EventStoreError::Backend("Event store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(
        &self,
        aggregate_id: AggregateId,
        expected_version: Version,
        new_events: Vec<NewEvent>,
    ) -> Result<Version, EventStoreError> {
        self.ensure_online()?;
        let delay = self.delay_append_ms.load(Ordering::Relaxed);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let mut guard = self.streams.write().await;
        let stream = guard.entry(aggregate_id).or_default();
        let actual = stream.len() as Version;
        if actual != expected_version {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend(
            new_events
                .into_iter()
                .zip(expected_version + 1..)
                .map(|(event, version)| StoredEvent {
                    aggregate_id,
                    version,
                    event_type: event.event_type,
                    timestamp: event.timestamp,
                    payload: event.payload,
                }),
        );
        Ok(stream.len() as Version)
    }

    async fn read(
        &self,
        aggregate_id: AggregateId,
        from_version: Version,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        self.ensure_online()?;
        let guard = self.streams.read().await;
        Ok(guard
            .get(&aggregate_id)
            .map(|stream| {
                stream
                    .iter()
                    .filter(|event| event.version > from_version)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn version(&self, aggregate_id: AggregateId) -> Result<Version, EventStoreError> {
        self.ensure_online()?;
        let guard = self.streams.read().await;
        Ok(guard
            .get(&aggregate_id)
            .map(|stream| stream.len() as Version)
            .unwrap_or(0))
    }
}
