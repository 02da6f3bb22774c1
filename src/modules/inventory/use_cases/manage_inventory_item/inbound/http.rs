use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::modules::inventory::use_cases::manage_inventory_item::commands::{
    CheckInItemsToInventory, CreateInventoryItem, DeactivateInventoryItem,
    RemoveItemsFromInventory, RenameInventoryItem,
};
use crate::shared::core::messages::Command;
use crate::shared::core::primitives::{AggregateId, Version};
use crate::shared::infrastructure::bus::BusError;
use crate::shared::infrastructure::bus::handlers::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateInventoryItemBody {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateInventoryItemResponse {
    pub id: AggregateId,
}

#[derive(Deserialize)]
pub struct RenameInventoryItemBody {
    pub name: String,
    pub expected_version: Version,
}

#[derive(Deserialize)]
pub struct ChangeCountBody {
    pub count: i64,
    pub expected_version: Version,
}

#[derive(Deserialize)]
pub struct DeactivateInventoryItemBody {
    pub expected_version: Version,
}

pub fn status_for(error: &BusError) -> StatusCode {
    if error.is_concurrency_conflict() {
        StatusCode::CONFLICT
    } else if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else if matches!(error.application_error(), Some(ApplicationError::Domain(_))) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn dispatch<C: Command>(state: &AppState, command: C) -> Result<(), Response> {
    match state.runtime.send(command).await {
        Ok(outcome) => {
            for fault in &outcome.faults {
                warn!(error = %fault, "read model may be behind");
            }
            Ok(())
        }
        Err(e) => {
            for fault in e.faults() {
                warn!(error = %fault, "read model may be behind");
            }
            Err((status_for(&e), e.to_string()).into_response())
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateInventoryItemBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let id = AggregateId::new();
    let command = CreateInventoryItem {
        id,
        name: body.name,
    };
    match dispatch(&state, command).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(CreateInventoryItemResponse { id }),
        )
            .into_response(),
        Err(response) => response,
    }
}

pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<RenameInventoryItemBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = RenameInventoryItem {
        id: id.into(),
        name: body.name,
        expected_version: body.expected_version,
    };
    match dispatch(&state, command).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ChangeCountBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = CheckInItemsToInventory {
        id: id.into(),
        count: body.count,
        expected_version: body.expected_version,
    };
    match dispatch(&state, command).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ChangeCountBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = RemoveItemsFromInventory {
        id: id.into(),
        count: body.count,
        expected_version: body.expected_version,
    };
    match dispatch(&state, command).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<DeactivateInventoryItemBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = DeactivateInventoryItem {
        id: id.into(),
        expected_version: body.expected_version,
    };
    match dispatch(&state, command).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}
