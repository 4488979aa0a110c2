//! SEO API endpoint

use axum::Extension;
use serde::Deserialize;

use crate::seo::SeoData;
use crate::seo::SiteUrl;
use crate::seo::resolve;
use crate::storage::Storage;

use super::Error;
use super::QueryParameters;
use super::Success;

#[derive(Debug, Deserialize)]
pub struct SeoQuery {
    path: Option<String>,
}

/// SEO metadata of a site path
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/seo-data?path=/krakow'
/// ```
///
/// Response:
/// ```json
/// { "siteName": "Ontdek Polen", "title": "Krakau - Ontdek Polen", "type": "website" ... }
/// ```
pub async fn seo_data<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(site_url): Extension<SiteUrl>,
    QueryParameters(query): QueryParameters<SeoQuery>,
) -> Result<Success<SeoData>, Error> {
    let path = query
        .path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| Error::bad_request("Path parameter is required"))?;

    let seo = resolve(&storage, &site_url, &path)
        .await
        .map_err(|err| Error::internal_server_error("Failed to fetch SEO data").with_description(err))?;

    Ok(Success::ok(seo))
}
