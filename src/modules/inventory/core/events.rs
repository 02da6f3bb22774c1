use crate::shared::core::aggregate::DomainEvent;
use crate::shared::core::messages::Event;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemCreated {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemRenamed {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsCheckedInToInventory {
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsRemovedFromInventory {
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemDeactivated {}

impl Event for InventoryItemCreated {}
impl Event for InventoryItemRenamed {}
impl Event for ItemsCheckedInToInventory {}
impl Event for ItemsRemovedFromInventory {}
impl Event for InventoryItemDeactivated {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InventoryItemEvent {
    InventoryItemCreated(InventoryItemCreated),
    InventoryItemRenamed(InventoryItemRenamed),
    ItemsCheckedInToInventory(ItemsCheckedInToInventory),
    ItemsRemovedFromInventory(ItemsRemovedFromInventory),
    InventoryItemDeactivated(InventoryItemDeactivated),
}

impl DomainEvent for InventoryItemEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::InventoryItemCreated(_) => "InventoryItemCreated",
            Self::InventoryItemRenamed(_) => "InventoryItemRenamed",
            Self::ItemsCheckedInToInventory(_) => "ItemsCheckedInToInventory",
            Self::ItemsRemovedFromInventory(_) => "ItemsRemovedFromInventory",
            Self::InventoryItemDeactivated(_) => "InventoryItemDeactivated",
        }
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        match self {
            Self::InventoryItemCreated(e) => e,
            Self::InventoryItemRenamed(e) => e,
            Self::ItemsCheckedInToInventory(e) => e,
            Self::ItemsRemovedFromInventory(e) => e,
            Self::InventoryItemDeactivated(e) => e,
        }
    }
}
