//! Crawler detection
//!
//! Requests from search engines and link previews get the SEO data of their path resolved and
//! attached to the request. Resolving is best effort: a failure is logged and the request
//! continues as usual.

use axum::Extension;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::TypedHeader;
use axum_extra::headers::UserAgent;

use crate::api::decode_path;
use crate::seo::SiteUrl;
use crate::seo::resolve;
use crate::storage::Storage;

/// Lowercase fragments of known crawler user agents
const CRAWLERS: &[&str] = &[
    "googlebot",
    "bingbot",
    "slurp",
    "duckduckbot",
    "baiduspider",
    "yandexbot",
    "facebookexternalhit",
    "twitterbot",
    "rogerbot",
    "linkedinbot",
    "embedly",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "pinterest",
    "developers.google.com",
];

/// Path segment to preview the SEO data in a browser
const PREVIEW_SEGMENT: &str = "seo-preview";

/// Is the user agent a known crawler?
pub fn is_crawler(user_agent: &str) -> bool {
    let user_agent = user_agent.to_lowercase();

    CRAWLERS.iter().any(|crawler| user_agent.contains(crawler))
}

/// The site path to resolve, if the request needs SEO data
fn seo_path(path: &str, user_agent: Option<&str>) -> Option<String> {
    if path == "/api" || path.starts_with("/api/") {
        return None;
    }

    let path = decode_path(path);

    // any path mentioning the segment is previewed, a leading one is not part of the site path
    if path.contains(PREVIEW_SEGMENT) {
        let path = path.strip_prefix('/').unwrap_or(&path);
        let path = path.strip_prefix(PREVIEW_SEGMENT).unwrap_or(path);

        return Some(path.to_string());
    }

    user_agent.filter(|user_agent| is_crawler(user_agent))?;

    Some(path)
}

/// Attach SEO data to requests from crawlers
pub async fn middleware<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(site_url): Extension<SiteUrl>,
    user_agent: Option<TypedHeader<UserAgent>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_agent = user_agent.map(|TypedHeader(user_agent)| user_agent);
    let user_agent = user_agent.as_ref().map(UserAgent::as_str);

    if let Some(path) = seo_path(request.uri().path(), user_agent) {
        match resolve(&storage, &site_url, &path).await {
            Ok(seo) => {
                tracing::info!(
                    "SEO data resolved for /{}: {} (User-Agent: {})",
                    path.trim_matches('/'),
                    seo.title,
                    user_agent.unwrap_or_default().chars().take(50).collect::<String>()
                );

                request.extensions_mut().insert(seo);
            }
            Err(err) => tracing::error!("Could not resolve SEO data for {path}: {err}"),
        }
    }

    next.run(request).await
}
