use crate::modules::inventory::core::decision::{DecideError, Decision};
use crate::modules::inventory::core::events::{
    InventoryItemCreated, InventoryItemDeactivated, InventoryItemEvent, InventoryItemRenamed,
    ItemsCheckedInToInventory, ItemsRemovedFromInventory,
};
use crate::modules::inventory::core::state::InventoryItem;
use crate::modules::inventory::use_cases::manage_inventory_item::commands::{
    CheckInItemsToInventory, CreateInventoryItem, DeactivateInventoryItem, RemoveItemsFromInventory,
    RenameInventoryItem,
};

pub fn decide_create(command: CreateInventoryItem) -> Decision {
    if command.name.trim().is_empty() {
        return Decision::reject(DecideError::EmptyName);
    }
    Decision::accept(InventoryItemEvent::InventoryItemCreated(InventoryItemCreated {
        name: command.name,
    }))
}

pub fn decide_rename(_state: &InventoryItem, command: RenameInventoryItem) -> Decision {
    if command.name.trim().is_empty() {
        return Decision::reject(DecideError::EmptyName);
    }
    Decision::accept(InventoryItemEvent::InventoryItemRenamed(InventoryItemRenamed {
        name: command.name,
    }))
}

pub fn decide_check_in(state: &InventoryItem, command: CheckInItemsToInventory) -> Decision {
    if command.count <= 0 {
        return Decision::reject(DecideError::NonPositiveCount(command.count));
    }
    if state.count.checked_add(command.count).is_none() {
        return Decision::reject(DecideError::CountOutOfRange {
            current: state.count,
            count: command.count,
        });
    }
    Decision::accept(InventoryItemEvent::ItemsCheckedInToInventory(
        ItemsCheckedInToInventory {
            count: command.count,
        },
    ))
}

pub fn decide_remove(state: &InventoryItem, command: RemoveItemsFromInventory) -> Decision {
    if command.count <= 0 {
        return Decision::reject(DecideError::NonPositiveCount(command.count));
    }
    if state.count.checked_sub(command.count).is_none() {
        return Decision::reject(DecideError::CountOutOfRange {
            current: state.count,
            count: command.count,
        });
    }
    Decision::accept(InventoryItemEvent::ItemsRemovedFromInventory(
        ItemsRemovedFromInventory {
            count: command.count,
        },
    ))
}

pub fn decide_deactivate(state: &InventoryItem, _command: DeactivateInventoryItem) -> Decision {
    if !state.activated {
        return Decision::reject(DecideError::AlreadyDeactivated);
    }
    Decision::accept(InventoryItemEvent::InventoryItemDeactivated(
        InventoryItemDeactivated {},
    ))
}
