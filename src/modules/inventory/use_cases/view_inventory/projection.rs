// Read model projections of inventory items.
//
// Purpose
// - Keep the list view and the detail view in step with committed inventory events.
//
// Responsibilities
// - InventoryListProjection: one row per active item (id, name). Deactivation removes it.
// - InventoryDetailProjection: one row per active item with stock count and the version
//   of the last event applied, which clients send back as expected_version.

use crate::modules::inventory::adapters::outbound::projections::InventoryProjectionRepository;
use crate::modules::inventory::core::events::{
    InventoryItemCreated, InventoryItemDeactivated, InventoryItemRenamed,
    ItemsCheckedInToInventory, ItemsRemovedFromInventory,
};
use crate::shared::core::primitives::{AggregateId, EventMetadata, Version};
use crate::shared::infrastructure::bus::handlers::{ApplicationError, EventHandler};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryListView {
    pub id: AggregateId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemDetailView {
    pub id: AggregateId,
    pub name: String,
    pub current_count: i64,
    pub version: Version,
}

fn projection_error(error: anyhow::Error) -> ApplicationError {
    ApplicationError::Unexpected(format!("projection store: {error}"))
}

fn count_out_of_range(view: &InventoryItemDetailView, count: i64) -> ApplicationError {
    ApplicationError::Unexpected(format!(
        "stock count {} of inventory item {} cannot change by {count}",
        view.current_count, view.id
    ))
}

pub struct InventoryListProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    repository: Arc<P>,
}

impl<P> InventoryListProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    async fn upsert(&self, id: AggregateId, name: &str) -> Result<(), ApplicationError> {
        self.repository
            .upsert_list_item(InventoryListView {
                id,
                name: name.to_string(),
            })
            .await
            .map_err(projection_error)
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemCreated> for InventoryListProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &InventoryItemCreated,
    ) -> Result<(), ApplicationError> {
        self.upsert(metadata.aggregate_id, &event.name).await
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemRenamed> for InventoryListProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &InventoryItemRenamed,
    ) -> Result<(), ApplicationError> {
        self.upsert(metadata.aggregate_id, &event.name).await
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemDeactivated> for InventoryListProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        _event: &InventoryItemDeactivated,
    ) -> Result<(), ApplicationError> {
        self.repository
            .remove_list_item(metadata.aggregate_id)
            .await
            .map_err(projection_error)
    }
}

pub struct InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    repository: Arc<P>,
}

impl<P> InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    async fn update<F>(&self, metadata: &EventMetadata, change: F) -> Result<(), ApplicationError>
    where
        F: FnOnce(&mut InventoryItemDetailView) -> Result<(), ApplicationError> + Send,
    {
        let mut view = self
            .repository
            .details(metadata.aggregate_id)
            .await
            .map_err(projection_error)?
            .ok_or_else(|| {
                ApplicationError::Unexpected(format!(
                    "no detail view for inventory item {}",
                    metadata.aggregate_id
                ))
            })?;
        change(&mut view)?;
        view.version = metadata.version;
        self.repository
            .upsert_details(view)
            .await
            .map_err(projection_error)
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemCreated> for InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &InventoryItemCreated,
    ) -> Result<(), ApplicationError> {
        self.repository
            .upsert_details(InventoryItemDetailView {
                id: metadata.aggregate_id,
                name: event.name.clone(),
                current_count: 0,
                version: metadata.version,
            })
            .await
            .map_err(projection_error)
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemRenamed> for InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &InventoryItemRenamed,
    ) -> Result<(), ApplicationError> {
        let name = event.name.clone();
        self.update(metadata, move |view| {
            view.name = name;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<P> EventHandler<ItemsCheckedInToInventory> for InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &ItemsCheckedInToInventory,
    ) -> Result<(), ApplicationError> {
        let count = event.count;
        self.update(metadata, move |view| {
            let next = view
                .current_count
                .checked_add(count)
                .ok_or_else(|| count_out_of_range(view, count))?;
            view.current_count = next;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<P> EventHandler<ItemsRemovedFromInventory> for InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        event: &ItemsRemovedFromInventory,
    ) -> Result<(), ApplicationError> {
        let count = event.count;
        self.update(metadata, move |view| {
            let next = view
                .current_count
                .checked_sub(count)
                .ok_or_else(|| count_out_of_range(view, count))?;
            view.current_count = next;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<P> EventHandler<InventoryItemDeactivated> for InventoryDetailProjection<P>
where
    P: InventoryProjectionRepository + 'static,
{
    async fn handle(
        &self,
        metadata: &EventMetadata,
        _event: &InventoryItemDeactivated,
    ) -> Result<(), ApplicationError> {
        self.repository
            .remove_details(metadata.aggregate_id)
            .await
            .map_err(projection_error)
    }
}
