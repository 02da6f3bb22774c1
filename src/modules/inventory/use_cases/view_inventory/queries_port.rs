use crate::modules::inventory::use_cases::view_inventory::projection::{
    InventoryItemDetailView, InventoryListView,
};
use crate::shared::core::primitives::AggregateId;
use async_trait::async_trait;

#[async_trait]
pub trait ReadModelFacade {
    async fn list_items(&self) -> anyhow::Result<Vec<InventoryListView>>;

    async fn item_details(
        &self,
        id: AggregateId,
    ) -> anyhow::Result<Option<InventoryItemDetailView>>;
}
