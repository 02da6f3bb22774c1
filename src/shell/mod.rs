// Composition root of the inventory service.
//
// Responsibilities:
// - Read config from environment.
// - Instantiate the event store, the read model and the runtime with its handler modules.
// - Expose the HTTP router.

pub mod config;
pub mod http;
pub mod state;
