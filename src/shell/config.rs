// Process configuration read from the environment (and .env when present).

use anyhow::Context;
use std::net::SocketAddr;

use crate::shared::infrastructure::repository::cache::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a port number")?,
            None => 8080,
        };
        let cache_capacity = match lookup("CACHE_CAPACITY") {
            Some(capacity) => capacity
                .parse()
                .context("CACHE_CAPACITY must be a non-negative integer")?,
            None => DEFAULT_CACHE_CAPACITY,
        };
        Ok(Self {
            host,
            port,
            cache_capacity,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
