// Message markers for the in-process bus.
//
// Purpose
// - A command is an intent to change one aggregate, consumed by exactly one handler.
// - An event is a fact about one aggregate, observed by zero or more handlers.
//
// Routing
// - Both are routed by their concrete Rust type, never by name.

use crate::shared::core::primitives::{AggregateId, Version};
use std::fmt::Debug;

pub trait Command: Debug + Send + Sync + 'static {
    /// Target aggregate. Creation commands carry the identity the new aggregate will get.
    fn aggregate_id(&self) -> AggregateId;

    /// Version the caller last observed, for optimistic concurrency. `None` skips the check.
    fn expected_version(&self) -> Option<Version> {
        None
    }
}

pub trait Event: Debug + Send + Sync + 'static {}
