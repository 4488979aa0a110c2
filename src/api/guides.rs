//! Guides API endpoints

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::guides::Guide;
use crate::storage::ContentFilter;
use crate::storage::Storage;

use super::Error;
use super::PathParameters;
use super::Success;
use super::cached;
use super::parse_slug;

/// Guide response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideResponse {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub header_image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub published: bool,
    pub show_on_homepage: bool,
    pub ranking: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GuideResponse {
    fn from_guide(guide: Guide) -> Self {
        Self {
            id: guide.id,
            slug: guide.slug,
            title: guide.title,
            description: guide.description,
            header_image: guide.header_image,
            alt: guide.alt,
            link: guide.link,
            published: guide.published,
            show_on_homepage: guide.show_on_homepage,
            ranking: guide.ranking,
            created_at: guide.created_at,
            updated_at: guide.updated_at,
        }
    }

    fn from_guide_multiple(guides: Vec<Guide>) -> Vec<Self> {
        guides.into_iter().map(Self::from_guide).collect()
    }
}

/// List the guides of the homepage
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/guides/homepage
/// ```
pub async fn homepage<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(cache): Extension<QueryCache>,
) -> Result<Success<Value>, Error> {
    cached(&cache, "guides/homepage", async {
        storage
            .find_guides(&ContentFilter::homepage())
            .await
            .map(GuideResponse::from_guide_multiple)
    })
    .await
    .map(Success::ok)
}

/// List all visible guides
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<Vec<GuideResponse>>, Error> {
    let guides = storage
        .find_guides(&ContentFilter::all())
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(GuideResponse::from_guide_multiple(guides)))
}

/// Get a single guide
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/guides/reizen-met-de-trein
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(slug): PathParameters<String>,
) -> Result<Success<GuideResponse>, Error> {
    let slug = parse_slug(&slug)?;

    let guide = storage
        .find_single_guide_by_slug(&slug)
        .await
        .map_err(Error::internal_server_error)?
        .filter(Guide::is_visible)
        .ok_or_else(|| Error::not_found("Guide not found"))?;

    Ok(Success::ok(GuideResponse::from_guide(guide)))
}
