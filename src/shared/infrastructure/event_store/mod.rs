// Event store port: the append-only source of truth.
//
// Contract
// - append is atomic per stream: every new event is recorded with consecutive versions
//   starting at expected_version + 1, or none is.
// - append fails with ConcurrencyConflict when the stream's current version differs from
//   expected_version at the moment of the append. This check-and-set is the only
//   concurrency control in the runtime; no lock is held between a read and an append.
// - read returns the events with a version greater than from_version, in version order.
//   read(id, 0) is the full history.
//
// Payloads are stored serialized so one store serves every aggregate type and a durable
// backend can implement the same trait.

use crate::shared::core::primitives::{AggregateId, Version};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod in_memory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventStoreError {
    #[error("concurrency conflict on {aggregate_id}: expected version {expected}, actual {actual}")]
    ConcurrencyConflict {
        aggregate_id: AggregateId,
        expected: Version,
        actual: Version,
    },

    #[error("backend error: {0}")]
    Backend(String),
}

impl EventStoreError {
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

/// An event that has not been assigned a version yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub aggregate_id: AggregateId,
    pub version: Version,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns the stream version after the append.
    async fn append(
        &self,
        aggregate_id: AggregateId,
        expected_version: Version,
        new_events: Vec<NewEvent>,
    ) -> Result<Version, EventStoreError>;

    async fn read(
        &self,
        aggregate_id: AggregateId,
        from_version: Version,
    ) -> Result<Vec<StoredEvent>, EventStoreError>;

    /// Current version of the stream, 0 when it has no events.
    async fn version(&self, aggregate_id: AggregateId) -> Result<Version, EventStoreError>;
}
