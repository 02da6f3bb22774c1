// A minimal aggregate used to exercise the runtime without the inventory domain.

use crate::shared::core::aggregate::{Aggregate, DomainEvent};
use crate::shared::core::messages::{Command, Event};
use crate::shared::core::primitives::{AggregateId, Version};
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    pub name: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterCreated {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterIncremented {
    pub by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRenamed {
    pub name: String,
}

impl Event for CounterCreated {}
impl Event for CounterIncremented {}
impl Event for CounterRenamed {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CounterEvent {
    Created(CounterCreated),
    Incremented(CounterIncremented),
    Renamed(CounterRenamed),
}

impl CounterEvent {
    pub fn created(name: &str) -> Self {
        Self::Created(CounterCreated { name: name.into() })
    }

    pub fn incremented(by: i64) -> Self {
        Self::Incremented(CounterIncremented { by })
    }

    pub fn renamed(name: &str) -> Self {
        Self::Renamed(CounterRenamed { name: name.into() })
    }
}

impl DomainEvent for CounterEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => "CounterCreated",
            Self::Incremented(_) => "CounterIncremented",
            Self::Renamed(_) => "CounterRenamed",
        }
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        match self {
            Self::Created(e) => e,
            Self::Incremented(e) => e,
            Self::Renamed(e) => e,
        }
    }
}

impl Aggregate for Counter {
    type Event = CounterEvent;

    const TYPE: &'static str = "Counter";

    fn apply(&mut self, event: &CounterEvent) {
        match event {
            CounterEvent::Created(e) => self.name = e.name.clone(),
            CounterEvent::Incremented(e) => self.total += e.by,
            CounterEvent::Renamed(e) => self.name = e.name.clone(),
        }
    }
}

/// Creation followed by one increment per entry.
pub fn counter_history(name: &str, increments: &[i64]) -> Vec<CounterEvent> {
    std::iter::once(CounterEvent::created(name))
        .chain(increments.iter().map(|by| CounterEvent::incremented(*by)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct CreateCounter {
    pub id: AggregateId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct IncrementCounter {
    pub id: AggregateId,
    pub by: i64,
    pub expected_version: Option<Version>,
}

impl Command for CreateCounter {
    fn aggregate_id(&self) -> AggregateId {
        self.id
    }
}

impl Command for IncrementCounter {
    fn aggregate_id(&self) -> AggregateId {
        self.id
    }

    fn expected_version(&self) -> Option<Version> {
        self.expected_version
    }
}
