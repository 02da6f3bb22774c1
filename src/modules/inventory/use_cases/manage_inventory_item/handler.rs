// Command handlers of the inventory item aggregate.
//
// Each handler loads the item through the session (checking the expected version), asks
// the pure decide function for the resulting events, applies them, and saves the session.

use crate::modules::inventory::core::decision::Decision;
use crate::modules::inventory::core::state::InventoryItem;
use crate::modules::inventory::use_cases::manage_inventory_item::commands::{
    CheckInItemsToInventory, CreateInventoryItem, DeactivateInventoryItem,
    RemoveItemsFromInventory, RenameInventoryItem,
};
use crate::modules::inventory::use_cases::manage_inventory_item::decide::{
    decide_check_in, decide_create, decide_deactivate, decide_remove, decide_rename,
};
use crate::shared::core::aggregate::AggregateRoot;
use crate::shared::core::messages::Command;
use crate::shared::infrastructure::bus::handlers::{ApplicationError, CommandHandler};
use crate::shared::infrastructure::session::Session;
use async_trait::async_trait;

pub struct InventoryCommandHandlers;

impl InventoryCommandHandlers {
    fn apply(
        root: &mut AggregateRoot<InventoryItem>,
        decision: Decision,
    ) -> Result<(), ApplicationError> {
        match decision {
            Decision::Accepted { events } => {
                events.into_iter().for_each(|event| root.apply_change(event));
                Ok(())
            }
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason.to_string())),
        }
    }

    async fn change<C, F>(
        session: &mut Session,
        command: C,
        decide: F,
    ) -> Result<(), ApplicationError>
    where
        C: Command,
        F: FnOnce(&InventoryItem, C) -> Decision + Send,
    {
        let root = session
            .get_expected::<InventoryItem>(command.aggregate_id(), command.expected_version())
            .await?;
        let decision = decide(root.state(), command);
        Self::apply(root, decision)?;
        session.save().await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<CreateInventoryItem> for InventoryCommandHandlers {
    async fn handle(
        &self,
        command: CreateInventoryItem,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        let root = session.add(AggregateRoot::<InventoryItem>::new(command.id))?;
        Self::apply(root, decide_create(command))?;
        session.save().await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<RenameInventoryItem> for InventoryCommandHandlers {
    async fn handle(
        &self,
        command: RenameInventoryItem,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        Self::change(session, command, decide_rename).await
    }
}

#[async_trait]
impl CommandHandler<CheckInItemsToInventory> for InventoryCommandHandlers {
    async fn handle(
        &self,
        command: CheckInItemsToInventory,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        Self::change(session, command, decide_check_in).await
    }
}

#[async_trait]
impl CommandHandler<RemoveItemsFromInventory> for InventoryCommandHandlers {
    async fn handle(
        &self,
        command: RemoveItemsFromInventory,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        Self::change(session, command, decide_remove).await
    }
}

#[async_trait]
impl CommandHandler<DeactivateInventoryItem> for InventoryCommandHandlers {
    async fn handle(
        &self,
        command: DeactivateInventoryItem,
        session: &mut Session,
    ) -> Result<(), ApplicationError> {
        Self::change(session, command, decide_deactivate).await
    }
}
