// Handler module of the inventory bounded context.
//
// Binds the inventory command handlers and the two read model projections. The list
// projection is registered before the detail projection, so it observes each event first.

use crate::modules::inventory::adapters::outbound::projections::InventoryProjectionRepository;
use crate::modules::inventory::core::events::{
    InventoryItemCreated, InventoryItemDeactivated, InventoryItemRenamed,
    ItemsCheckedInToInventory, ItemsRemovedFromInventory,
};
use crate::modules::inventory::use_cases::manage_inventory_item::commands::{
    CheckInItemsToInventory, CreateInventoryItem, DeactivateInventoryItem,
    RemoveItemsFromInventory, RenameInventoryItem,
};
use crate::modules::inventory::use_cases::manage_inventory_item::handler::InventoryCommandHandlers;
use crate::modules::inventory::use_cases::view_inventory::projection::{
    InventoryDetailProjection, InventoryListProjection,
};
use crate::shared::infrastructure::bus::BusError;
use crate::shared::infrastructure::bus::registrar::{HandlerModule, HandlerRegistrar};
use std::sync::Arc;

pub struct InventoryModule<P>
where
    P: InventoryProjectionRepository + 'static,
{
    projections: Arc<P>,
}

impl<P> InventoryModule<P>
where
    P: InventoryProjectionRepository + 'static,
{
    pub fn new(projections: Arc<P>) -> Self {
        Self { projections }
    }
}

impl<P> HandlerModule for InventoryModule<P>
where
    P: InventoryProjectionRepository + 'static,
{
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn register_handlers(&self, registrar: &mut HandlerRegistrar<'_>) -> Result<(), BusError> {
        let commands = Arc::new(InventoryCommandHandlers);
        registrar
            .command::<CreateInventoryItem, _>(commands.clone())?
            .command::<RenameInventoryItem, _>(commands.clone())?
            .command::<CheckInItemsToInventory, _>(commands.clone())?
            .command::<RemoveItemsFromInventory, _>(commands.clone())?
            .command::<DeactivateInventoryItem, _>(commands)?;

        let list = Arc::new(InventoryListProjection::new(self.projections.clone()));
        let details = Arc::new(InventoryDetailProjection::new(self.projections.clone()));
        registrar
            .event::<InventoryItemCreated, _>(list.clone())
            .event::<InventoryItemRenamed, _>(list.clone())
            .event::<InventoryItemDeactivated, _>(list)
            .event::<InventoryItemCreated, _>(details.clone())
            .event::<InventoryItemRenamed, _>(details.clone())
            .event::<ItemsCheckedInToInventory, _>(details.clone())
            .event::<ItemsRemovedFromInventory, _>(details.clone())
            .event::<InventoryItemDeactivated, _>(details);
        Ok(())
    }
}
