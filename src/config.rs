use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_SOURCE_URL: &str = "https://en.wikipedia.org/wiki/List_of_FIFA_World_Cup_finals";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
}

impl DashboardConfig {
    /// Reads `.env.local` / `.env` (when present) and then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        Self::from_values(
            env::var("FINALS_SOURCE_URL").ok(),
            env::var("FINALS_BIND_ADDR").ok(),
            env::var("FINALS_FETCH_TIMEOUT_SECS").ok(),
        )
    }

    /// Builds the config from raw variable values; `None` means unset.
    pub fn from_values(
        source_url: Option<String>,
        bind_addr: Option<String>,
        fetch_timeout_secs: Option<String>,
    ) -> Result<Self> {
        let source_url = source_url
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());

        let raw_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid FINALS_BIND_ADDR {raw_addr:?}"))?;

        let fetch_timeout = fetch_timeout_secs
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
            .max(1);

        Ok(Self {
            source_url,
            bind_addr,
            fetch_timeout: Duration::from_secs(fetch_timeout),
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}
