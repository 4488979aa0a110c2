#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::http::Method;
use axum::http::header;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::Error;
use crate::api::router;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::seo::SiteUrl;
use crate::storage::Memory;
use crate::storage::Postgres;
use crate::storage::Storage;

mod activities;
mod api;
mod cache;
mod config;
mod crawlers;
mod destinations;
mod graceful_shutdown;
mod guides;
mod highlights;
mod images;
mod motivation;
mod pages;
mod seo;
mod site_settings;
mod storage;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "ontdek_polen=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    setup_tracing();

    tracing::debug!("Running in {:?} environment", config.environment);

    let app = setup_app(&config).await?;

    let listener = TcpListener::bind(config.address).await?;
    tracing::info!("Listening on {}", config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Database connection
/// - Database migrations
pub async fn setup_app(config: &Config) -> Result<Router> {
    let cache = QueryCache::new(config.cache_ttl);
    let site_url = SiteUrl(config.site_url.clone());

    let router = if let Some(database) = &config.database {
        let storage = Postgres::connect(database).await?;
        tracing::info!("Using Postgres storage");

        create_router(storage, cache, site_url)
    } else {
        tracing::warn!("`DATABASE_URL` is not set, using an empty memory storage");

        create_router(Memory::new(), cache, site_url)
    };

    Ok(router)
}

/// Create the router for the content API
fn create_router<S: Storage>(storage: S, cache: QueryCache, site_url: SiteUrl) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", router::<S>())
        .fallback(|| async { Error::not_found("Not found") })
        .layer(middleware::from_fn(crawlers::middleware::<S>))
        .layer(Extension(storage))
        .layer(Extension(cache))
        .layer(Extension(site_url))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
