// Startup registration of handler modules.
//
// Purpose
// - A HandlerModule lists the handlers a bounded context provides. The registrar binds each
//   of them on the bus under the message type its capability names.
//
// Responsibilities
// - Fail fast: the first command type claimed twice aborts registration with
//   AmbiguousHandler, before the bus serves any traffic.
// - Event types may have any number of handlers, zero included.

use crate::shared::core::messages::{Command, Event};
use crate::shared::infrastructure::bus::handlers::{CommandHandler, EventHandler};
use crate::shared::infrastructure::bus::{BusError, InProcessBus};
use std::sync::Arc;
use tracing::{debug, info};

pub trait HandlerModule {
    fn name(&self) -> &'static str;

    fn register_handlers(&self, registrar: &mut HandlerRegistrar<'_>) -> Result<(), BusError>;
}

pub struct HandlerRegistrar<'a> {
    bus: &'a mut InProcessBus,
    command_handlers: usize,
    event_handlers: usize,
}

impl<'a> HandlerRegistrar<'a> {
    pub fn new(bus: &'a mut InProcessBus) -> Self {
        Self {
            bus,
            command_handlers: 0,
            event_handlers: 0,
        }
    }

    pub fn register<M: HandlerModule + ?Sized>(&mut self, module: &M) -> Result<(), BusError> {
        let (commands_before, events_before) = (self.command_handlers, self.event_handlers);
        module.register_handlers(self)?;
        info!(
            module = module.name(),
            command_handlers = self.command_handlers - commands_before,
            event_handlers = self.event_handlers - events_before,
            "handler module registered"
        );
        Ok(())
    }

    pub fn command<C, H>(&mut self, handler: Arc<H>) -> Result<&mut Self, BusError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        self.bus.register_command_handler::<C, H>(handler)?;
        debug!(
            command = std::any::type_name::<C>(),
            handler = std::any::type_name::<H>(),
            "command handler bound"
        );
        self.command_handlers += 1;
        Ok(self)
    }

    pub fn event<E, H>(&mut self, handler: Arc<H>) -> &mut Self
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        self.bus.register_event_handler::<E, H>(handler);
        debug!(
            event = std::any::type_name::<E>(),
            handler = std::any::type_name::<H>(),
            "event handler bound"
        );
        self.event_handlers += 1;
        self
    }

    pub fn command_handlers(&self) -> usize {
        self.command_handlers
    }

    pub fn event_handlers(&self) -> usize {
        self.event_handlers
    }
}
