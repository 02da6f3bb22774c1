use crate::modules::inventory::core::events::InventoryItemEvent;
use crate::modules::inventory::core::evolve::evolve;
use crate::shared::core::aggregate::Aggregate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryItem {
    pub name: String,
    pub activated: bool,
    pub count: i64,
}

impl Aggregate for InventoryItem {
    type Event = InventoryItemEvent;

    const TYPE: &'static str = "InventoryItem";

    fn apply(&mut self, event: &InventoryItemEvent) {
        evolve(self, event);
    }
}
