use crate::shared::core::messages::Command;
use crate::shared::core::primitives::{AggregateId, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInventoryItem {
    pub id: AggregateId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameInventoryItem {
    pub id: AggregateId,
    pub name: String,
    pub expected_version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInItemsToInventory {
    pub id: AggregateId,
    pub count: i64,
    pub expected_version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItemsFromInventory {
    pub id: AggregateId,
    pub count: i64,
    pub expected_version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivateInventoryItem {
    pub id: AggregateId,
    pub expected_version: Version,
}

impl Command for CreateInventoryItem {
    fn aggregate_id(&self) -> AggregateId {
        self.id
    }
}

macro_rules! versioned_command {
    ($($command:ty),+ $(,)?) => {
        $(
            impl Command for $command {
                fn aggregate_id(&self) -> AggregateId {
                    self.id
                }

                fn expected_version(&self) -> Option<Version> {
                    Some(self.expected_version)
                }
            }
        )+
    };
}

versioned_command!(
    RenameInventoryItem,
    CheckInItemsToInventory,
    RemoveItemsFromInventory,
    DeactivateInventoryItem,
);
