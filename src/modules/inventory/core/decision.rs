use crate::modules::inventory::core::events::InventoryItemEvent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("count must be positive, got {0}")]
    NonPositiveCount(i64),

    #[error("changing a stock of {current} by {count} is out of range")]
    CountOutOfRange { current: i64, count: i64 },

    #[error("inventory item is already deactivated")]
    AlreadyDeactivated,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted { events: Vec<InventoryItemEvent> },
    Rejected { reason: DecideError },
}

impl Decision {
    pub fn accept(event: InventoryItemEvent) -> Self {
        Self::Accepted {
            events: vec![event],
        }
    }

    pub fn reject(reason: DecideError) -> Self {
        Self::Rejected { reason }
    }
}
