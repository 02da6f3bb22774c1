// Process-wide wiring of the command side.
//
// Responsibilities
// - Own the singletons: one event store and one bus, shared for the process lifetime.
// - Build a fresh session, with its own cache, for every command dispatch.

use crate::shared::core::messages::Command;
use crate::shared::infrastructure::bus::registrar::{HandlerModule, HandlerRegistrar};
use crate::shared::infrastructure::bus::{BusError, DispatchOutcome, InProcessBus};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::repository::cache::{CacheRepository, DEFAULT_CACHE_CAPACITY};
use crate::shared::infrastructure::repository::event_sourced::EventSourcedRepository;
use crate::shared::infrastructure::session::Session;
use std::sync::Arc;

#[derive(Clone)]
pub struct Runtime {
    event_store: Arc<dyn EventStore>,
    bus: Arc<InProcessBus>,
    cache_capacity: usize,
}

impl Runtime {
    pub fn new(event_store: Arc<dyn EventStore>, bus: InProcessBus) -> Self {
        Self {
            event_store,
            bus: Arc::new(bus),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Registers every module on a fresh bus. The first duplicate command handler aborts.
    pub fn with_modules(
        event_store: Arc<dyn EventStore>,
        modules: &[&dyn HandlerModule],
    ) -> Result<Self, BusError> {
        let mut bus = InProcessBus::new();
        let mut registrar = HandlerRegistrar::new(&mut bus);
        for module in modules {
            registrar.register(*module)?;
        }
        Ok(Self::new(event_store, bus))
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn session(&self) -> Session {
        let repository = EventSourcedRepository::new(self.event_store.clone(), self.bus.clone());
        Session::new(CacheRepository::with_capacity(
            repository,
            self.event_store.clone(),
            self.cache_capacity,
        ))
    }

    /// Dispatches one command in its own session.
    pub async fn send<C: Command>(&self, command: C) -> Result<DispatchOutcome, BusError> {
        let mut session = self.session();
        self.bus.send(command, &mut session).await
    }

    pub fn event_store(&self) -> &Arc<dyn EventStore> {
        &self.event_store
    }
}
