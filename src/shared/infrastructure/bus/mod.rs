// In-process command and event bus.
//
// Purpose
// - Route a command to the single handler registered for its concrete type.
// - Route a committed event to every handler registered for its concrete type.
//
// Ordering
// - Dispatch is sequential. A command call returns only after its handler, the handler's
//   session save, and every event handler triggered by that save have completed.
// - Event handlers run one after another in registration order. A failing handler is
//   reported as EventHandlerFaulted and the remaining handlers still run.
// - Faults are reported on success and on failure alike: a command that commits one
//   aggregate and then conflicts on another still carries the first commit's faults.
//
// Routing table
// - Built at startup through the registrar and read-only afterwards, so dispatch takes no lock.

use crate::shared::core::messages::{Command, Event};
use crate::shared::core::primitives::{AggregateId, EventMetadata, Version};
use crate::shared::infrastructure::session::Session;
use async_trait::async_trait;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, error, info_span, warn};

pub mod handlers;
pub mod registrar;

use handlers::{ApplicationError, CommandHandler, EventHandler};

#[derive(Debug, Error)]
pub enum BusError {
    #[error("no handler registered for command {command}")]
    NoHandlerRegistered { command: &'static str },

    #[error("command {command} is claimed by more than one handler: {handlers:?}")]
    AmbiguousHandler {
        command: &'static str,
        handlers: Vec<&'static str>,
    },

    #[error("command {command} failed in {handler}: {source}")]
    CommandFailed {
        command: &'static str,
        handler: &'static str,
        #[source]
        source: ApplicationError,
        // Faults of events committed by this command before it failed.
        faults: Vec<EventHandlerFaulted>,
    },
}

impl BusError {
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::CommandFailed { source, .. } if source.is_concurrency_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommandFailed { source, .. } if source.is_not_found())
    }

    pub fn faults(&self) -> &[EventHandlerFaulted] {
        match self {
            Self::CommandFailed { faults, .. } => faults,
            _ => &[],
        }
    }

    pub fn application_error(&self) -> Option<&ApplicationError> {
        match self {
            Self::CommandFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("event handler {handler} faulted on {event_type} ({aggregate_id} v{version}): {source}")]
pub struct EventHandlerFaulted {
    pub handler: &'static str,
    pub event_type: &'static str,
    pub aggregate_id: AggregateId,
    pub version: Version,
    #[source]
    pub source: ApplicationError,
}

/// A committed event on its way to the handlers. The payload is the concrete event struct.
#[derive(Clone, Copy)]
pub struct PublishedEvent<'a> {
    pub metadata: &'a EventMetadata,
    pub event_type: &'static str,
    pub payload: &'a (dyn Any + Send + Sync),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Runs every handler for the event and returns the ones that faulted.
    async fn publish(&self, event: PublishedEvent<'_>) -> Vec<EventHandlerFaulted>;
}

/// What a successful dispatch reports back to the caller.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub faults: Vec<EventHandlerFaulted>,
}

impl DispatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

struct CommandRoute {
    handler_name: &'static str,
    // Arc<dyn CommandHandler<C>> for the C this route is keyed by.
    handler: Box<dyn Any + Send + Sync>,
}

#[async_trait]
trait EventRoute: Send + Sync {
    fn handler_name(&self) -> &'static str;

    async fn deliver(
        &self,
        metadata: &EventMetadata,
        payload: &(dyn Any + Send + Sync),
    ) -> Result<(), ApplicationError>;
}

struct TypedEventRoute<E, H> {
    handler: Arc<H>,
    _event: PhantomData<fn(E)>,
}

#[async_trait]
impl<E, H> EventRoute for TypedEventRoute<E, H>
where
    E: Event,
    H: EventHandler<E> + 'static,
{
    fn handler_name(&self) -> &'static str {
        type_name::<H>()
    }

    async fn deliver(
        &self,
        metadata: &EventMetadata,
        payload: &(dyn Any + Send + Sync),
    ) -> Result<(), ApplicationError> {
        match payload.downcast_ref::<E>() {
            Some(event) => self.handler.handle(metadata, event).await,
            None => Err(ApplicationError::Unexpected(format!(
                "route for {} received another event type",
                type_name::<E>()
            ))),
        }
    }
}

#[derive(Default)]
pub struct InProcessBus {
    command_routes: HashMap<TypeId, Vec<CommandRoute>>,
    event_routes: HashMap<TypeId, Vec<Box<dyn EventRoute>>>,
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with AmbiguousHandler when the command type already has a handler.
    pub fn register_command_handler<C, H>(&mut self, handler: Arc<H>) -> Result<(), BusError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let routes = self.command_routes.entry(TypeId::of::<C>()).or_default();
        if !routes.is_empty() {
            let mut handlers: Vec<&'static str> = routes.iter().map(|r| r.handler_name).collect();
            handlers.push(type_name::<H>());
            return Err(BusError::AmbiguousHandler {
                command: type_name::<C>(),
                handlers,
            });
        }
        let handler: Arc<dyn CommandHandler<C>> = handler;
        routes.push(CommandRoute {
            handler_name: type_name::<H>(),
            handler: Box::new(handler),
        });
        Ok(())
    }

    pub fn register_event_handler<E, H>(&mut self, handler: Arc<H>)
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        self.event_routes
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(TypedEventRoute::<E, H> {
                handler,
                _event: PhantomData,
            }));
    }

    pub fn has_command_handler<C: Command>(&self) -> bool {
        self.command_routes
            .get(&TypeId::of::<C>())
            .is_some_and(|routes| !routes.is_empty())
    }

    pub fn event_handler_count<E: Event>(&self) -> usize {
        self.event_routes
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Hands the command and the session of this dispatch to the command's handler.
    pub async fn send<C: Command>(
        &self,
        command: C,
        session: &mut Session,
    ) -> Result<DispatchOutcome, BusError> {
        let command_name = type_name::<C>();
        let routes = self
            .command_routes
            .get(&TypeId::of::<C>())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let route = match routes {
            [] => {
                return Err(BusError::NoHandlerRegistered {
                    command: command_name,
                });
            }
            [route] => route,
            _ => {
                return Err(BusError::AmbiguousHandler {
                    command: command_name,
                    handlers: routes.iter().map(|r| r.handler_name).collect(),
                });
            }
        };
        let handler = route
            .handler
            .downcast_ref::<Arc<dyn CommandHandler<C>>>()
            .ok_or(BusError::NoHandlerRegistered {
                command: command_name,
            })?;

        let span = info_span!(
            "command",
            command = command_name,
            handler = route.handler_name,
            aggregate_id = %command.aggregate_id()
        );
        Self::dispatch(route.handler_name, handler.as_ref(), command, session)
            .instrument(span)
            .await
    }

    async fn dispatch<C: Command>(
        handler_name: &'static str,
        handler: &dyn CommandHandler<C>,
        command: C,
        session: &mut Session,
    ) -> Result<DispatchOutcome, BusError> {
        debug!("dispatching command");
        if let Err(source) = handler.handle(command, session).await {
            warn!(error = %source, "command failed");
            return Err(BusError::CommandFailed {
                command: type_name::<C>(),
                handler: handler_name,
                source,
                faults: session.take_faults(),
            });
        }
        if session.has_pending_changes() {
            warn!("handler returned without saving; pending events are discarded");
        }
        debug!("command completed");
        Ok(DispatchOutcome {
            faults: session.take_faults(),
        })
    }
}

#[async_trait]
impl EventPublisher for InProcessBus {
    async fn publish(&self, event: PublishedEvent<'_>) -> Vec<EventHandlerFaulted> {
        let type_id = {
            let payload: &dyn Any = event.payload;
            payload.type_id()
        };
        let Some(routes) = self.event_routes.get(&type_id) else {
            debug!(event_type = event.event_type, "no event handlers registered");
            return Vec::new();
        };

        let mut faults = Vec::new();
        for route in routes {
            if let Err(source) = route.deliver(event.metadata, event.payload).await {
                error!(
                    event_type = event.event_type,
                    handler = route.handler_name(),
                    aggregate_id = %event.metadata.aggregate_id,
                    version = event.metadata.version,
                    error = %source,
                    "event handler faulted"
                );
                faults.push(EventHandlerFaulted {
                    handler: route.handler_name(),
                    event_type: event.event_type,
                    aggregate_id: event.metadata.aggregate_id,
                    version: event.metadata.version,
                    source,
                });
            }
        }
        faults
    }
}
