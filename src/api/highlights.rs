//! Highlights API endpoint

use axum::Extension;
use serde::Serialize;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::highlights::Highlight;
use crate::storage::Storage;

use super::Error;
use super::Success;
use super::cached;

/// Highlight response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResponse {
    pub id: i32,
    pub name: String,
    pub icon_path: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub ranking: i32,
}

impl HighlightResponse {
    fn from_highlight(highlight: Highlight) -> Self {
        Self {
            id: highlight.id,
            name: highlight.name,
            icon_path: highlight.icon_path,
            category: highlight.category,
            link: highlight.link,
            ranking: highlight.ranking,
        }
    }
}

/// List the highlights of the homepage
///
/// At most `maxHighlightsVisible` of the site settings are returned
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/highlights
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(cache): Extension<QueryCache>,
) -> Result<Success<Value>, Error> {
    cached(&cache, "highlights", async {
        let settings = storage.find_site_settings().await?.unwrap_or_default();
        let limit = i64::from(settings.max_highlights_visible.max(0));

        storage.find_highlights(limit).await.map(|highlights| {
            highlights
                .into_iter()
                .map(HighlightResponse::from_highlight)
                .collect::<Vec<_>>()
        })
    })
    .await
    .map(Success::ok)
}
