use crate::modules::inventory::core::events::InventoryItemEvent;
use crate::modules::inventory::core::state::InventoryItem;

pub fn evolve(state: &mut InventoryItem, event: &InventoryItemEvent) {
    match event {
        InventoryItemEvent::InventoryItemCreated(e) => {
            state.name = e.name.clone();
            state.activated = true;
        }
        InventoryItemEvent::InventoryItemRenamed(e) => state.name = e.name.clone(),
        // Saturates; decisions already reject counts that leave the range.
        InventoryItemEvent::ItemsCheckedInToInventory(e) => {
            state.count = state.count.saturating_add(e.count)
        }
        InventoryItemEvent::ItemsRemovedFromInventory(e) => {
            state.count = state.count.saturating_sub(e.count)
        }
        InventoryItemEvent::InventoryItemDeactivated(_) => state.activated = false,
    }
}
