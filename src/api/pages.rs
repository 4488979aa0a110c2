//! Pages API endpoints

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::pages::Page;
use crate::storage::ContentFilter;
use crate::storage::Storage;

use super::Error;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::parse_slug;

/// Filters of a listing, `?featured=true`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub featured: bool,
}

impl ListQuery {
    pub fn filter(&self) -> ContentFilter {
        if self.featured {
            ContentFilter::featured()
        } else {
            ContentFilter::all()
        }
    }
}

/// Page response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub template: String,
    pub header_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub ranking: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PageResponse {
    fn from_page(page: Page) -> Self {
        Self {
            id: page.id,
            slug: page.slug,
            title: page.title,
            content: page.content,
            description: page.description,
            template: page.template,
            header_image: page.header_image,
            meta_title: page.meta_title,
            meta_description: page.meta_description,
            meta_keywords: page.meta_keywords,
            featured: page.featured,
            published: page.published,
            ranking: page.ranking,
            created_at: page.created_at,
            updated_at: page.updated_at,
        }
    }
}

/// List the published pages
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/pages?featured=true'
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    QueryParameters(query): QueryParameters<ListQuery>,
) -> Result<Success<Vec<PageResponse>>, Error> {
    let pages = storage
        .find_pages(&query.filter())
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(
        pages.into_iter().map(PageResponse::from_page).collect(),
    ))
}

/// Get a single published page
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/pages/gdansk
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(slug): PathParameters<String>,
) -> Result<Success<PageResponse>, Error> {
    let slug = parse_slug(&slug)?;

    let page = storage
        .find_single_page_by_slug(&slug)
        .await
        .map_err(Error::internal_server_error)?
        .filter(Page::is_visible)
        .ok_or_else(|| Error::not_found("Page not found"))?;

    Ok(Success::ok(PageResponse::from_page(page)))
}
