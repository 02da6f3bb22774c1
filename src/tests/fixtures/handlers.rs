// Handlers and wiring helpers shared by the runtime tests.

use crate::shared::core::aggregate::AggregateRoot;
use crate::shared::core::primitives::{AggregateId, EventMetadata, Version};
use crate::shared::infrastructure::bus::handlers::{
    ApplicationError, CommandHandler, EventHandler,
};
use crate::shared::infrastructure::bus::{
    EventHandlerFaulted, EventPublisher, InProcessBus, PublishedEvent,
};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::repository::cache::CacheRepository;
use crate::shared::infrastructure::repository::event_sourced::EventSourcedRepository;
use crate::shared::infrastructure::session::Session;
use crate::tests::fixtures::counter::{
    Counter, CounterCreated, CounterEvent, CounterIncremented, CreateCounter, IncrementCounter,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct CounterCommandHandlers;

#[async_trait]
impl CommandHandler<CreateCounter> for CounterCommandHandlers {
    async fn handle(
        &self,
        command: CreateCounter,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        session
            .add(AggregateRoot::<Counter>::new(command.id))?
            .apply_change(CounterEvent::created(&command.name));
        session.save().await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<IncrementCounter> for CounterCommandHandlers {
    async fn handle(
        &self,
        command: IncrementCounter,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        session
            .get_expected::<Counter>(command.id, command.expected_version)
            .await?
            .apply_change(CounterEvent::incremented(command.by));
        session.save().await?;
        Ok(())
    }
}

/// Appends "label:aggregate_id:version" to a shared journal for every event it sees.
pub struct RecordingEventHandler {
    label: &'static str,
    journal: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingEventHandler {
    pub fn new(label: &'static str, journal: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            journal,
            fail: false,
        }
    }

    pub fn failing(label: &'static str, journal: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            journal,
            fail: true,
        }
    }

    async fn record(&self, metadata: &EventMetadata) -> Result<(), ApplicationError> {
        self.journal.lock().await.push(format!(
            "{}:{}:{}",
            self.label, metadata.aggregate_id, metadata.version
        ));
        if self.fail {
            return Err(ApplicationError::Unexpected(format!("{} failed", self.label)));
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<CounterCreated> for RecordingEventHandler {
    async fn handle(
        &self,
        metadata: &EventMetadata,
        _event: &CounterCreated,
    ) -> Result<(), ApplicationError> {
        self.record(metadata).await
    }
}

#[async_trait]
impl EventHandler<CounterIncremented> for RecordingEventHandler {
    async fn handle(
        &self,
        metadata: &EventMetadata,
        _event: &CounterIncremented,
    ) -> Result<(), ApplicationError> {
        self.record(metadata).await
    }
}

/// Publisher that only remembers what went through it.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(AggregateId, Version, String)>>,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: PublishedEvent<'_>) -> Vec<EventHandlerFaulted> {
        self.published.lock().await.push((
            event.metadata.aggregate_id,
            event.metadata.version,
            event.event_type.to_string(),
        ));
        Vec::new()
    }
}

pub fn session_for(event_store: Arc<dyn EventStore>, bus: Arc<InProcessBus>) -> Session {
    let repository = EventSourcedRepository::new(event_store.clone(), bus);
    Session::new(CacheRepository::new(repository, event_store))
}

pub async fn seed_counter(
    event_store: &Arc<dyn EventStore>,
    bus: &Arc<InProcessBus>,
    id: AggregateId,
    name: &str,
) {
    let mut session = session_for(event_store.clone(), bus.clone());
    session
        .add(AggregateRoot::<Counter>::new(id))
        .expect("seed add failed")
        .apply_change(CounterEvent::created(name));
    session.save().await.expect("seed save failed");
}
