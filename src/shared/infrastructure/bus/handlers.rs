// Handler capabilities.
//
// Purpose
// - A type declares it handles command C by implementing CommandHandler<C>, and event E by
//   implementing EventHandler<E>. The registrar binds handlers by these capabilities only.
//
// Responsibilities
// - Command handlers load aggregates through the session, apply changes, and call
//   session.save() before returning.
// - Event handlers react to committed facts (read models, notifications). They are
//   independent of each other: one failing does not stop the others.

use crate::shared::core::messages::{Command, Event};
use crate::shared::core::primitives::EventMetadata;
use crate::shared::infrastructure::repository::RepositoryError;
use crate::shared::infrastructure::session::{Session, SessionError};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("domain rejected: {0}")]
    Domain(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::Session(e) if e.is_concurrency_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Session(e) if e.is_not_found())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        Self::Session(SessionError::Repository(value))
    }
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C, session: &mut Session) -> Result<(), ApplicationError>;
}

#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    async fn handle(&self, metadata: &EventMetadata, event: &E) -> Result<(), ApplicationError>;
}
