//! All API endpoint setup

use std::future::Future;

use axum::Json;
use axum::Router;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use serde::Serialize;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::storage;
use crate::storage::Storage;

pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use request::decode_path;
pub use request::parse_slug;
pub use response::Error;
pub use response::Success;

mod activities;
mod batch_processing;
mod destinations;
mod guides;
mod highlights;
mod images;
mod pages;
mod request;
mod response;
mod seo;
mod site;

/// Paths of the status endpoint, the others are kept for older clients
const STATUS_PATHS: &[&str] = &[
    "/ai/batch-processing/status",
    "/ai-status",
    "/ai-batch-status",
    "/batch-processing-status",
    "/images/ai-status",
];

/// Endpoints listed when a client asks for one that does not exist
const AVAILABLE: &[&str] = &[
    "/ai/batch-processing/status",
    "/ai/batch-processing/start",
    "/destinations",
    "/destinations/homepage",
    "/destinations/{slug}",
    "/guides",
    "/guides/homepage",
    "/guides/{slug}",
    "/pages",
    "/pages/{slug}",
    "/activities",
    "/activities/location/{location}",
    "/highlights",
    "/site-settings",
    "/motivation",
    "/seo-data",
    "/auth/status",
    "/images/transform",
    "/images/analyze",
    "/images/presets",
    "/images/process",
    "/images/process/batch",
];

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let router = STATUS_PATHS.iter().fold(Router::new(), |router, path| {
        router.route(path, get(batch_processing::status::<S>))
    });

    let destinations = Router::new()
        .route("/", get(destinations::list::<S>))
        .route("/homepage", get(destinations::homepage::<S>))
        .route("/{destination}", get(destinations::single::<S>));

    let guides = Router::new()
        .route("/", get(guides::list::<S>))
        .route("/homepage", get(guides::homepage::<S>))
        .route("/{guide}", get(guides::single::<S>));

    let pages = Router::new()
        .route("/", get(pages::list::<S>))
        .route("/{page}", get(pages::single::<S>));

    let activities = Router::new()
        .route("/", get(activities::list::<S>))
        .route("/location/{location}", get(activities::by_location::<S>));

    let images = Router::new()
        .route("/transform", get(images::transform))
        .route("/analyze", get(images::analyze))
        .route("/presets", get(images::presets))
        .route("/process", post(images::process))
        .route("/process/batch", post(images::process_batch));

    router
        .route("/ai/batch-processing/start", post(batch_processing::start))
        .route("/ai-start", post(batch_processing::start_flat))
        .nest("/destinations", destinations)
        .nest("/guides", guides)
        .nest("/pages", pages)
        .nest("/activities", activities)
        .nest("/images", images)
        .route("/highlights", get(highlights::list::<S>))
        .route("/site-settings", get(site::site_settings::<S>))
        .route("/motivation", get(site::motivation::<S>))
        .route("/auth/status", get(site::auth_status))
        .route("/seo-data", get(seo::seo_data::<S>))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}

async fn method_not_allowed() -> Error {
    Error::method_not_allowed()
}

#[derive(Serialize)]
struct NotFound<'a> {
    error: &'static str,
    path: &'a str,
    method: &'a str,
    available: &'static [&'static str],
}

/// Unknown API endpoint, lists the ones that do exist
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path());

    tracing::debug!("Unknown API endpoint: {method} {path}");

    (
        StatusCode::NOT_FOUND,
        Json(NotFound {
            error: "API endpoint not found",
            path,
            method: method.as_str(),
            available: AVAILABLE,
        }),
    )
        .into_response()
}

/// Read through the query cache
///
/// The fetched data is cached in its serialized form, a failed fetch is not cached
pub async fn cached<T, F>(cache: &QueryCache, key: &str, fetch: F) -> Result<Value, Error>
where
    T: Serialize,
    F: Future<Output = storage::Result<T>>,
{
    cache
        .get_or_fetch(key, async {
            let data = fetch.await.map_err(Error::internal_server_error)?;

            serde_json::to_value(data).map_err(Error::internal_server_error)
        })
        .await
        .map_err(|err| Error::clone(&err))
}
