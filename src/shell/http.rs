use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::inventory::use_cases::manage_inventory_item::inbound::http as manage_http;
use crate::modules::inventory::use_cases::view_inventory::inbound::http as view_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/inventory", get(view_http::list).post(manage_http::create))
        .route("/inventory/{id}", get(view_http::details))
        .route("/inventory/{id}/rename", post(manage_http::rename))
        .route("/inventory/{id}/check-in", post(manage_http::check_in))
        .route("/inventory/{id}/remove", post(manage_http::remove))
        .route("/inventory/{id}/deactivate", post(manage_http::deactivate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
