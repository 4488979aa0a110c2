//! Destinations API endpoints
//!
//! Public, read-only access to the destinations

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::destinations::Destination;
use crate::storage::ContentFilter;
use crate::storage::Storage;

use super::Error;
use super::PathParameters;
use super::Success;
use super::cached;
use super::parse_slug;

/// Destination response going to the user
///
/// Basically filtering which fields are shown to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResponse {
    /// Destination ID
    pub id: i32,

    /// Slug used to identify the destination
    pub slug: String,

    pub name: String,
    pub description: String,
    pub header_image: Option<String>,
    pub ai_image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub published: bool,
    pub show_on_homepage: bool,
    pub ranking: i32,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl DestinationResponse {
    /// Create a response from a [`Destination`](Destination)
    ///
    /// Basically filtering which fields are shown to the user
    fn from_destination(destination: Destination) -> Self {
        Self {
            id: destination.id,
            slug: destination.slug,
            name: destination.name,
            description: destination.description,
            header_image: destination.header_image,
            ai_image: destination.ai_image,
            alt: destination.alt,
            link: destination.link,
            published: destination.published,
            show_on_homepage: destination.show_on_homepage,
            ranking: destination.ranking,
            created_at: destination.created_at,
            updated_at: destination.updated_at,
        }
    }

    /// Create a response from multiple [`Destination`](Destination)s
    fn from_destination_multiple(destinations: Vec<Destination>) -> Vec<Self> {
        destinations
            .into_iter()
            .map(Self::from_destination)
            .collect::<Vec<Self>>()
    }
}

/// List the destinations of the homepage
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/destinations/homepage
/// ```
///
/// Response:
/// ```json
/// [ { "id": 1, "slug": "krakow", "name": "Krakau" ... } ]
/// ```
pub async fn homepage<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(cache): Extension<QueryCache>,
) -> Result<Success<Value>, Error> {
    cached(&cache, "destinations/homepage", async {
        storage
            .find_destinations(&ContentFilter::homepage())
            .await
            .map(DestinationResponse::from_destination_multiple)
    })
    .await
    .map(Success::ok)
}

/// List all visible destinations
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/destinations
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<Vec<DestinationResponse>>, Error> {
    let destinations = storage
        .find_destinations(&ContentFilter::all())
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(DestinationResponse::from_destination_multiple(
        destinations,
    )))
}

/// Get a single destination
///
/// Unpublished and soft-deleted destinations do not exist for the public
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/destinations/krakow
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "slug": "krakow", "name": "Krakau" ... }
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(slug): PathParameters<String>,
) -> Result<Success<DestinationResponse>, Error> {
    let slug = parse_slug(&slug)?;

    let destination = storage
        .find_single_destination_by_slug(&slug)
        .await
        .map_err(Error::internal_server_error)?
        .filter(Destination::is_visible)
        .ok_or_else(|| Error::not_found("Destination not found"))?;

    Ok(Success::ok(DestinationResponse::from_destination(
        destination,
    )))
}
