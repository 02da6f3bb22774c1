use tracing_subscriber::{EnvFilter, fmt};

use cqrs_inventory::shell::config::Config;
use cqrs_inventory::shell::http::router;
use cqrs_inventory::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let state = AppState::in_memory(config.cache_capacity)?;
    let app = router(state);

    let addr = config.socket_addr()?;
    tracing::info!(cache_capacity = config.cache_capacity, "inventory endpoint: http://{}/inventory", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
