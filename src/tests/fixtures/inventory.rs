use crate::modules::inventory::core::events::{
    InventoryItemCreated, InventoryItemDeactivated, InventoryItemEvent, InventoryItemRenamed,
    ItemsCheckedInToInventory, ItemsRemovedFromInventory,
};
use crate::shared::core::primitives::{AggregateId, EventMetadata, Version};
use chrono::{TimeZone, Utc};

pub fn created(name: &str) -> InventoryItemEvent {
    InventoryItemEvent::InventoryItemCreated(InventoryItemCreated { name: name.into() })
}

pub fn renamed(name: &str) -> InventoryItemEvent {
    InventoryItemEvent::InventoryItemRenamed(InventoryItemRenamed { name: name.into() })
}

pub fn checked_in(count: i64) -> InventoryItemEvent {
    InventoryItemEvent::ItemsCheckedInToInventory(ItemsCheckedInToInventory { count })
}

pub fn removed(count: i64) -> InventoryItemEvent {
    InventoryItemEvent::ItemsRemovedFromInventory(ItemsRemovedFromInventory { count })
}

pub fn deactivated() -> InventoryItemEvent {
    InventoryItemEvent::InventoryItemDeactivated(InventoryItemDeactivated {})
}

pub fn inventory_metadata(aggregate_id: AggregateId, version: Version) -> EventMetadata {
    EventMetadata {
        aggregate_id,
        aggregate_type: "InventoryItem".into(),
        version,
        timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    }
}
