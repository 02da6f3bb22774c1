use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::shell::state::AppState;

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.queries.list_items().await {
        Ok(items) => Json(items).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

pub async fn details(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.queries.item_details(id.into()).await {
        Ok(Some(view)) => Json(view).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
