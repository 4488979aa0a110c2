//! Configuration
//!
//! Everything is read from environment variables, a `.env` file is loaded first when present.
//! Variables that are set but empty count as not set.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use url::Url;

use crate::storage::PostgresConfig;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";
const DEFAULT_MAX_CONNECTIONS: u32 = 1;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 30;
const DEFAULT_SITE_URL: &str = "https://o2-phi.vercel.app";

/// Where the service runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if name.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Postgres connection, the memory storage is used without it
    pub database: Option<PostgresConfig>,

    /// Where the service runs
    pub environment: Environment,

    /// How long cached query results stay fresh
    pub cache_ttl: Duration,

    /// Public URL of the site, used for canonical URLs in SEO data
    pub site_url: Url,
}

impl Config {
    /// Load the configuration from the environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration using `lookup` to read variables
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut address = var("ADDRESS")
            .as_deref()
            .unwrap_or(DEFAULT_ADDRESS)
            .parse::<SocketAddr>()
            .context("Invalid ADDRESS")?;

        // optional override of just the port
        if let Some(port) = var("PORT") {
            address.set_port(port.parse::<u16>().context("Invalid PORT")?);
        }

        let environment =
            Environment::from_name(var("APP_ENV").or_else(|| var("NODE_ENV")).as_deref());

        let database = match var("DATABASE_URL") {
            Some(url) => Some(PostgresConfig {
                url,
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .map(|value| value.parse::<u32>())
                    .transpose()
                    .context("Invalid DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                    .max(1),
                require_tls: environment == Environment::Production,
            }),
            None => None,
        };

        let cache_ttl = var("CACHE_TTL_SECONDS")
            .map(|value| value.parse::<u64>())
            .transpose()
            .context("Invalid CACHE_TTL_SECONDS")?
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);

        let site_url = var("SITE_URL")
            .as_deref()
            .unwrap_or(DEFAULT_SITE_URL)
            .parse::<Url>()
            .context("Invalid SITE_URL")?;

        Ok(Self {
            address,
            database,
            environment,
            cache_ttl: Duration::from_secs(cache_ttl),
            site_url,
        })
    }
}
