use crate::modules::inventory::use_cases::view_inventory::projection::{
    InventoryItemDetailView, InventoryListView,
};
use crate::shared::core::primitives::AggregateId;
use async_trait::async_trait;

#[async_trait]
pub trait InventoryProjectionRepository: Send + Sync {
    async fn upsert_list_item(&self, row: InventoryListView) -> anyhow::Result<()>;
    async fn remove_list_item(&self, id: AggregateId) -> anyhow::Result<()>;

    async fn details(&self, id: AggregateId) -> anyhow::Result<Option<InventoryItemDetailView>>;
    async fn upsert_details(&self, row: InventoryItemDetailView) -> anyhow::Result<()>;
    async fn remove_details(&self, id: AggregateId) -> anyhow::Result<()>;
}
