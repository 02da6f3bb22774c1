use crate::modules::inventory::adapters::outbound::projections::InventoryProjectionRepository;
use crate::modules::inventory::adapters::outbound::projections_in_memory::InMemoryInventoryProjections;
use crate::modules::inventory::module::InventoryModule;
use crate::modules::inventory::use_cases::view_inventory::queries_port::ReadModelFacade;
use crate::shared::infrastructure::bus::BusError;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shared::infrastructure::runtime::Runtime;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub runtime: Runtime,
    pub queries: Arc<dyn ReadModelFacade + Send + Sync>,
}

impl AppState {
    pub fn in_memory(cache_capacity: usize) -> Result<Self, BusError> {
        Self::wire(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(InMemoryInventoryProjections::new()),
            cache_capacity,
        )
    }

    /// Registers the inventory handlers against the given store and read model.
    pub fn wire<P>(
        event_store: Arc<dyn EventStore>,
        projections: Arc<P>,
        cache_capacity: usize,
    ) -> Result<Self, BusError>
    where
        P: InventoryProjectionRepository + ReadModelFacade + Send + Sync + 'static,
    {
        let inventory = InventoryModule::new(projections.clone());
        let runtime =
            Runtime::with_modules(event_store, &[&inventory])?.cache_capacity(cache_capacity);
        Ok(Self {
            runtime,
            queries: projections,
        })
    }
}
