// In memory projection repository and read model facade.
//
// Purpose
// - Serve the inventory views without a database.
//
// Responsibilities
// - Store list rows and detail rows in maps keyed by aggregate id. Ids are UUID v7, so the
//   list comes back in creation order.
// - toggle_offline makes every call fail, to exercise faulted event handlers.

use crate::modules::inventory::adapters::outbound::projections::InventoryProjectionRepository;
use crate::modules::inventory::use_cases::view_inventory::projection::{
    InventoryItemDetailView, InventoryListView,
};
use crate::modules::inventory::use_cases::view_inventory::queries_port::ReadModelFacade;
use crate::shared::core::primitives::AggregateId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryInventoryProjections {
    list: RwLock<BTreeMap<AggregateId, InventoryListView>>,
    details: RwLock<BTreeMap<AggregateId, InventoryItemDetailView>>,
    is_offline: bool,
}

impl InMemoryInventoryProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("Projections repository offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryProjectionRepository for InMemoryInventoryProjections {
    async fn upsert_list_item(&self, row: InventoryListView) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.list.write().await.insert(row.id, row);
        Ok(())
    }

    async fn remove_list_item(&self, id: AggregateId) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.list.write().await.remove(&id);
        Ok(())
    }

    async fn details(&self, id: AggregateId) -> anyhow::Result<Option<InventoryItemDetailView>> {
        self.ensure_online()?;
        Ok(self.details.read().await.get(&id).cloned())
    }

    async fn upsert_details(&self, row: InventoryItemDetailView) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.details.write().await.insert(row.id, row);
        Ok(())
    }

    async fn remove_details(&self, id: AggregateId) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.details.write().await.remove(&id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReadModelFacade for InMemoryInventoryProjections {
    async fn list_items(&self) -> anyhow::Result<Vec<InventoryListView>> {
        self.ensure_online()?;
        Ok(self.list.read().await.values().cloned().collect())
    }

    async fn item_details(
        &self,
        id: AggregateId,
    ) -> anyhow::Result<Option<InventoryItemDetailView>> {
        self.ensure_online()?;
        Ok(self.details.read().await.get(&id).cloned())
    }
}
