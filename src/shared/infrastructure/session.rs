// Unit of work for one command dispatch.
//
// Purpose
// - Track every aggregate a command handler touches, keyed by identity, and commit their
//   pending events at the end of the command.
//
// Responsibilities
// - A second get for the same identity returns the instance already tracked, so every
//   handler step mutates one in-memory copy.
// - save commits aggregates in the order they were first tracked. Each commit is
//   independent: a conflict on one aggregate does not undo commits already made for
//   others in the same session.
// - Faults from committed aggregates accumulate on the session until taken, including
//   when a later commit in the same save fails.
//
// Lifetime
// - Created per dispatch and dropped after it. Never shared between commands.

use crate::shared::core::aggregate::{Aggregate, AggregateRoot};
use crate::shared::core::primitives::{AggregateId, Version};
use crate::shared::infrastructure::bus::EventHandlerFaulted;
use crate::shared::infrastructure::event_store::EventStoreError;
use crate::shared::infrastructure::repository::cache::CacheRepository;
use crate::shared::infrastructure::repository::{AggregateRepository, Committed, RepositoryError};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("aggregate {aggregate_id} is already tracked by this session")]
    AlreadyTracked { aggregate_id: AggregateId },

    #[error("aggregate {aggregate_id} is tracked as another type than {expected}")]
    AggregateTypeMismatch {
        aggregate_id: AggregateId,
        expected: &'static str,
    },
}

impl SessionError {
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_concurrency_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }
}

#[async_trait]
trait Tracked<R: AggregateRepository + 'static>: Send + Sync {
    fn has_pending(&self) -> bool;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    async fn commit(&mut self, repository: &R) -> Result<Committed, RepositoryError>;
}

#[async_trait]
impl<A, R> Tracked<R> for AggregateRoot<A>
where
    A: Aggregate,
    R: AggregateRepository + 'static,
{
    fn has_pending(&self) -> bool {
        AggregateRoot::has_pending(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    async fn commit(&mut self, repository: &R) -> Result<Committed, RepositoryError> {
        repository.save(self).await
    }
}

pub struct Session<R = CacheRepository>
where
    R: AggregateRepository + 'static,
{
    repository: R,
    tracked: HashMap<AggregateId, Box<dyn Tracked<R>>>,
    order: Vec<AggregateId>,
    faults: Vec<EventHandlerFaulted>,
}

impl<R> Session<R>
where
    R: AggregateRepository + 'static,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            tracked: HashMap::new(),
            order: Vec::new(),
            faults: Vec::new(),
        }
    }

    /// Starts tracking a new aggregate. Saving it fails with a conflict if its stream exists.
    pub fn add<A: Aggregate>(
        &mut self,
        root: AggregateRoot<A>,
    ) -> Result<&mut AggregateRoot<A>, SessionError> {
        let id = root.id();
        if self.tracked.contains_key(&id) {
            return Err(SessionError::AlreadyTracked { aggregate_id: id });
        }
        self.track(id, Box::new(root));
        self.tracked_mut::<A>(id)
    }

    pub async fn get<A: Aggregate>(
        &mut self,
        id: AggregateId,
    ) -> Result<&mut AggregateRoot<A>, SessionError> {
        self.get_expected(id, None).await
    }

    /// Like get, but fails with a concurrency conflict when the aggregate is not at the
    /// version the caller expected.
    pub async fn get_expected<A: Aggregate>(
        &mut self,
        id: AggregateId,
        expected_version: Option<Version>,
    ) -> Result<&mut AggregateRoot<A>, SessionError> {
        if !self.tracked.contains_key(&id) {
            let root = self.repository.get::<A>(id).await?;
            debug!(aggregate_id = %id, aggregate_type = A::TYPE, version = root.version(), "tracking aggregate");
            self.track(id, Box::new(root));
        }
        let root = self.tracked_mut::<A>(id)?;
        if let Some(expected) = expected_version {
            if root.version() != expected {
                warn!(aggregate_id = %id, expected, actual = root.version(), "stale expected version");
                return Err(RepositoryError::Store(EventStoreError::ConcurrencyConflict {
                    aggregate_id: id,
                    expected,
                    actual: root.version(),
                })
                .into());
            }
        }
        Ok(root)
    }

    pub fn is_tracked(&self, id: AggregateId) -> bool {
        self.tracked.contains_key(&id)
    }

    pub fn has_pending_changes(&self) -> bool {
        self.tracked.values().any(|aggregate| aggregate.has_pending())
    }

    /// Commits every tracked aggregate with pending events, in tracking order.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        for id in &self.order {
            let Some(aggregate) = self.tracked.get_mut(id) else {
                continue;
            };
            if !aggregate.has_pending() {
                continue;
            }
            let committed = aggregate
                .commit(&self.repository)
                .await
                .inspect_err(|e| warn!(aggregate_id = %id, error = %e, "commit failed"))?;
            debug!(aggregate_id = %id, version = committed.version, "aggregate committed");
            self.faults.extend(committed.faults);
        }
        self.tracked.clear();
        self.order.clear();
        Ok(())
    }

    pub(crate) fn take_faults(&mut self) -> Vec<EventHandlerFaulted> {
        std::mem::take(&mut self.faults)
    }

    fn track(&mut self, id: AggregateId, aggregate: Box<dyn Tracked<R>>) {
        self.tracked.insert(id, aggregate);
        self.order.push(id);
    }

    fn tracked_mut<A: Aggregate>(
        &mut self,
        id: AggregateId,
    ) -> Result<&mut AggregateRoot<A>, SessionError> {
        self.tracked
            .get_mut(&id)
            .and_then(|aggregate| aggregate.as_any_mut().downcast_mut::<AggregateRoot<A>>())
            .ok_or(SessionError::AggregateTypeMismatch {
                aggregate_id: id,
                expected: A::TYPE,
            })
    }
}
