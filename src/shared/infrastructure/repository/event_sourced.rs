// Authoritative repository: replays streams from the event store and appends to it.
//
// Responsibilities
// - get folds the full stream, in version order, into a fresh aggregate.
// - save appends the pending events with the aggregate's committed version as expected
//   version, advances the in-memory version, then publishes each committed event once.
//
// Errors
// - Conflicts are returned as they come from the store. No retry happens here.

use crate::shared::core::aggregate::{Aggregate, AggregateRoot, DomainEvent};
use crate::shared::core::primitives::{AggregateId, EventMetadata};
use crate::shared::infrastructure::bus::{EventPublisher, PublishedEvent};
use crate::shared::infrastructure::event_store::{EventStore, NewEvent};
use crate::shared::infrastructure::repository::{AggregateRepository, Committed, RepositoryError};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct EventSourcedRepository {
    event_store: Arc<dyn EventStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl EventSourcedRepository {
    pub fn new(event_store: Arc<dyn EventStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            event_store,
            publisher,
        }
    }
}

#[async_trait]
impl AggregateRepository for EventSourcedRepository {
    async fn get<A: Aggregate>(&self, id: AggregateId) -> Result<AggregateRoot<A>, RepositoryError> {
        let stored = self.event_store.read(id, 0).await?;
        if stored.is_empty() {
            return Err(RepositoryError::AggregateNotFound {
                aggregate_id: id,
                aggregate_type: A::TYPE,
            });
        }

        let history = stored
            .into_iter()
            .zip(1..)
            .map(|(event, expected)| {
                if event.version != expected {
                    return Err(RepositoryError::StreamOutOfOrder {
                        aggregate_id: id,
                        expected,
                        found: event.version,
                    });
                }
                Ok(serde_json::from_value::<A::Event>(event.payload)?)
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        let root = AggregateRoot::<A>::replay(id, history);
        debug!(aggregate_id = %id, aggregate_type = A::TYPE, version = root.version(), "aggregate rehydrated");
        Ok(root)
    }

    async fn save<A: Aggregate>(
        &self,
        aggregate: &mut AggregateRoot<A>,
    ) -> Result<Committed, RepositoryError> {
        if !aggregate.has_pending() {
            return Ok(Committed {
                version: aggregate.version(),
                faults: Vec::new(),
            });
        }

        let id = aggregate.id();
        let expected = aggregate.version();
        let timestamp = Utc::now();
        let new_events = aggregate
            .pending_events()
            .iter()
            .map(|event| -> Result<NewEvent, RepositoryError> {
                Ok(NewEvent {
                    event_type: event.event_type().to_string(),
                    timestamp,
                    payload: serde_json::to_value(event)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let version = self
            .event_store
            .append(id, expected, new_events)
            .await
            .inspect_err(|e| {
                if e.is_concurrency_conflict() {
                    warn!(aggregate_id = %id, expected, error = %e, "append rejected");
                }
            })?;
        let committed = aggregate.mark_committed();
        debug!(aggregate_id = %id, aggregate_type = A::TYPE, version, events = committed.len(), "events appended");

        let mut faults = Vec::new();
        for (event, event_version) in committed.iter().zip(expected + 1..) {
            let metadata = EventMetadata {
                aggregate_id: id,
                aggregate_type: A::TYPE.to_string(),
                version: event_version,
                timestamp,
            };
            faults.extend(
                self.publisher
                    .publish(PublishedEvent {
                        metadata: &metadata,
                        event_type: event.event_type(),
                        payload: event.as_any(),
                    })
                    .await,
            );
        }
        Ok(Committed { version, faults })
    }
}
