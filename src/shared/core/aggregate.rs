// Event-sourced aggregate abstraction.
//
// Purpose
// - Describe what the runtime needs from a domain aggregate: a default (empty) state,
//   a pure apply function, and a serializable event enumeration.
//
// Responsibilities
// - AggregateRoot wraps the domain state with its identity, committed version and the
//   events produced since it was loaded (pending events).
// - Replaying a history folds events in order with the same apply function used for
//   new changes, so loading twice always yields the same state.
//
// Boundaries
// - No input or output here. Loading and saving belong to the repository.

use crate::shared::core::primitives::{AggregateId, Version};
use serde::{Serialize, de::DeserializeOwned};
use std::any::Any;
use std::fmt::Debug;

/// Root event enumeration of one aggregate type.
pub trait DomainEvent: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable name stored next to the serialized payload.
    fn event_type(&self) -> &'static str;

    /// The concrete event struct carried by this variant. The bus routes on its type.
    fn as_any(&self) -> &(dyn Any + Send + Sync);
}

pub trait Aggregate: Debug + Default + Clone + Send + Sync + 'static {
    type Event: DomainEvent;

    const TYPE: &'static str;

    /// Pure transition. Must not perform input or output.
    fn apply(&mut self, event: &Self::Event);
}

#[derive(Debug, Clone)]
pub struct AggregateRoot<A: Aggregate> {
    id: AggregateId,
    version: Version,
    state: A,
    pending: Vec<A::Event>,
}

impl<A: Aggregate> AggregateRoot<A> {
    pub fn new(id: AggregateId) -> Self {
        Self {
            id,
            version: 0,
            state: A::default(),
            pending: Vec::new(),
        }
    }

    pub fn replay<I>(id: AggregateId, history: I) -> Self
    where
        I: IntoIterator<Item = A::Event>,
    {
        history.into_iter().fold(Self::new(id), |mut root, event| {
            root.state.apply(&event);
            root.version += 1;
            root
        })
    }

    pub fn id(&self) -> AggregateId {
        self.id
    }

    /// Version of the last committed event. Pending events do not count.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn state(&self) -> &A {
        &self.state
    }

    pub fn pending_events(&self) -> &[A::Event] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn apply_change(&mut self, event: A::Event) {
        self.state.apply(&event);
        self.pending.push(event);
    }

    /// Drains the pending events once the store accepted them and advances the version.
    pub(crate) fn mark_committed(&mut self) -> Vec<A::Event> {
        let committed = std::mem::take(&mut self.pending);
        self.version += committed.len() as Version;
        committed
    }
}

#[cfg(test)]
mod aggregate_root_tests {
    use super::*;
    use crate::tests::fixtures::counter::{Counter, CounterEvent, counter_history};
    use rstest::{fixture, rstest};

    #[fixture]
    fn history() -> Vec<CounterEvent> {
        counter_history("alpha", &[2, 3])
    }

    #[rstest]
    fn it_should_replay_the_history_into_state_and_version(history: Vec<CounterEvent>) {
        let root = AggregateRoot::<Counter>::replay(AggregateId::new(), history);
        assert_eq!(root.version(), 3);
        assert_eq!(root.state().name, "alpha");
        assert_eq!(root.state().total, 5);
        assert!(!root.has_pending());
    }

    #[rstest]
    fn it_should_replay_deterministically(history: Vec<CounterEvent>) {
        let id = AggregateId::new();
        let first = AggregateRoot::<Counter>::replay(id, history.clone());
        let second = AggregateRoot::<Counter>::replay(id, history);
        assert_eq!(first.state(), second.state());
        assert_eq!(first.version(), second.version());
    }

    #[rstest]
    fn it_should_queue_changes_without_advancing_the_version(history: Vec<CounterEvent>) {
        let mut root = AggregateRoot::<Counter>::replay(AggregateId::new(), history);
        root.apply_change(CounterEvent::incremented(10));
        assert_eq!(root.state().total, 15);
        assert_eq!(root.version(), 3);
        assert_eq!(root.pending_events().len(), 1);

        let committed = root.mark_committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(root.version(), 4);
        assert!(!root.has_pending());
    }
}
