//! SEO metadata of site paths
//!
//! The single-page app asks for the metadata of the path it renders, crawlers get it resolved
//! before their request is handled.

use chrono::NaiveDateTime;
use serde::Serialize;
use url::Url;

use crate::site_settings::DEFAULT_SITE_DESCRIPTION;
use crate::site_settings::DEFAULT_SITE_NAME;
use crate::site_settings::SiteSettings;
use crate::storage::Result;
use crate::storage::Storage;

/// Homepage title when the site name is not configured
const DEFAULT_HOMEPAGE_TITLE: &str = "Ontdek Polen - Jouw Complete Gids voor Polen Reizen";

const HOMEPAGE_KEYWORDS: &str = "Polen reizen, Krakau, Gdansk, Tatra Mountains, Polen vakantie";

/// Open Graph image when the site has no social media image, relative to the site URL
const DEFAULT_IMAGE_PATH: &str = "images/og-poland-travel.jpg";

/// Public URL of the site
#[derive(Clone, Debug)]
pub struct SiteUrl(pub Url);

impl SiteUrl {
    /// Absolute URL of a path on the site, `""` is the homepage
    pub fn join(&self, path: &str) -> String {
        format!("{}/{path}", self.0.as_str().trim_end_matches('/'))
    }
}

/// Open Graph type of a page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Website,
    Article,
}

/// Metadata for the `<head>` of a page
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoData {
    pub site_name: String,
    pub default_image: String,
    pub title: String,
    pub description: String,
    pub image: String,

    /// Canonical URL
    pub url: String,

    #[serde(rename = "type")]
    pub page_type: PageType,

    pub keywords: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<NaiveDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<NaiveDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Location the page is about, used to find its activities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Empty strings count as not configured
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Resolve the SEO data of a site path
///
/// The homepage comes first, then pages and guides by slug. Unknown paths get generated
/// metadata, so this only fails when the storage does.
pub async fn resolve<S: Storage>(storage: &S, site_url: &SiteUrl, path: &str) -> Result<SeoData> {
    let path = path.trim().trim_matches('/');

    let settings = storage.find_site_settings().await?;
    let settings = settings.as_ref();

    let site_name = non_empty(settings.map(|settings| settings.site_name.as_str()))
        .unwrap_or(DEFAULT_SITE_NAME)
        .to_string();

    let default_image = non_empty(settings.and_then(|settings| settings.social_media_image.as_deref()))
        .map_or_else(|| site_url.join(DEFAULT_IMAGE_PATH), ToString::to_string);

    if path.is_empty() {
        return Ok(homepage(settings, site_url, site_name, default_image));
    }

    let url = site_url.join(path);

    if let Some(page) = storage.find_single_page_by_slug(path).await? {
        if page.is_visible() {
            tracing::debug!("SEO data for {path} from page {}", page.id);

            let page_type = if page.is_destination() {
                PageType::Website
            } else {
                PageType::Article
            };

            return Ok(SeoData {
                title: format!("{} - {DEFAULT_SITE_NAME}", page.title),
                description: non_empty(page.description.as_deref()).map_or_else(
                    || {
                        format!(
                            "Ontdek {} in Polen. Complete reisgids met tips en informatie voor jouw bezoek aan deze prachtige bestemming.",
                            page.title
                        )
                    },
                    ToString::to_string,
                ),
                image: non_empty(page.header_image.as_deref())
                    .map_or_else(|| default_image.clone(), ToString::to_string),
                url,
                page_type,
                keywords: format!("{}, Polen, reizen, bestemming", page.title),
                published_time: Some(page.created_at),
                modified_time: Some(page.updated_at),
                content: Some(page.content),
                location: Some(page.title),
                site_name,
                default_image,
            });
        }
    }

    if let Some(guide) = storage.find_single_guide_by_slug(path).await? {
        if guide.is_visible() {
            tracing::debug!("SEO data for {path} from guide {}", guide.id);

            return Ok(SeoData {
                title: format!("{} - {DEFAULT_SITE_NAME}", guide.title),
                description: non_empty(Some(guide.description.as_str())).map_or_else(
                    || {
                        format!(
                            "{} - Complete gids voor jouw Polen reis met praktische tips en insider informatie.",
                            guide.title
                        )
                    },
                    ToString::to_string,
                ),
                image: non_empty(guide.header_image.as_deref())
                    .map_or_else(|| default_image.clone(), ToString::to_string),
                url,
                page_type: PageType::Article,
                keywords: format!("{}, Polen reisgids, Polen tips, reizen Polen", guide.title),
                published_time: Some(guide.created_at),
                modified_time: Some(guide.updated_at),
                content: Some(guide.description),
                location: None,
                site_name,
                default_image,
            });
        }
    }

    tracing::debug!("No content for {path}, generating SEO data");

    Ok(SeoData {
        title: format!("{path} - {DEFAULT_SITE_NAME}"),
        description: format!(
            "Ontdek {path} in Polen. Jouw complete gids voor reizen naar deze bestemming in Polen."
        ),
        image: default_image.clone(),
        url,
        page_type: PageType::Website,
        keywords: format!("{path}, Polen, reizen, bestemming"),
        published_time: None,
        modified_time: None,
        content: None,
        location: None,
        site_name,
        default_image,
    })
}

fn homepage(
    settings: Option<&SiteSettings>,
    site_url: &SiteUrl,
    site_name: String,
    default_image: String,
) -> SeoData {
    let title = non_empty(settings.map(|settings| settings.site_name.as_str()))
        .unwrap_or(DEFAULT_HOMEPAGE_TITLE);

    let description = non_empty(settings.map(|settings| settings.site_description.as_str()))
        .unwrap_or(DEFAULT_SITE_DESCRIPTION);

    SeoData {
        title: title.to_string(),
        description: description.to_string(),
        image: default_image.clone(),
        url: site_url.join(""),
        page_type: PageType::Website,
        keywords: HOMEPAGE_KEYWORDS.to_string(),
        published_time: None,
        modified_time: None,
        content: None,
        location: None,
        site_name,
        default_image,
    }
}
