//! Site settings
//!
//! A single row of site-wide toggles and branding. When the row is missing the defaults below
//! are served instead.

use serde::Serialize;

/// Name of the site when nothing is configured
pub const DEFAULT_SITE_NAME: &str = "Ontdek Polen";

/// Description of the site when nothing is configured
pub const DEFAULT_SITE_DESCRIPTION: &str = "Ontdek de mooiste bestemmingen in Polen. Van historische steden tot natuurparken. Complete reisgidsen voor jouw perfecte Polen reis.";

/// Site-wide settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Name of the site
    pub site_name: String,

    /// Default meta description
    pub site_description: String,

    /// Default meta keywords
    pub meta_keywords: Option<String>,

    /// Favicon path
    pub favicon: Option<String>,

    /// Serve the custom favicon
    pub favicon_enabled: bool,

    /// Background image of the homepage hero
    pub background_image: Option<String>,

    /// Image used for Open Graph and other social previews
    pub social_media_image: Option<String>,

    /// Analytics property
    pub google_analytics_id: Option<String>,

    /// Injected stylesheet
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,

    /// Injected script
    #[serde(rename = "customJS")]
    pub custom_js: Option<String>,

    pub show_destinations: bool,
    pub show_guides: bool,
    pub show_highlights: bool,
    pub show_motivation: bool,
    pub show_ontdek_meer: bool,

    /// How many highlights the homepage shows at most
    pub max_highlights_visible: i32,

    /// Serve AI processed images where available
    pub ai_enhancement_enabled: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            meta_keywords: None,
            favicon: None,
            favicon_enabled: false,
            background_image: None,
            social_media_image: None,
            google_analytics_id: None,
            custom_css: None,
            custom_js: None,
            show_destinations: true,
            show_guides: true,
            show_highlights: true,
            show_motivation: true,
            show_ontdek_meer: true,
            max_highlights_visible: 16,
            ai_enhancement_enabled: false,
        }
    }
}
