//! CMS pages

use chrono::naive::NaiveDateTime;

/// Template used to render a destination page
pub const DESTINATION_TEMPLATE: &str = "destination";

/// A generic content page
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Page {
    /// Page ID
    pub id: i32,

    /// External identifier used in the URL
    pub slug: String,

    /// Title, also used to match activities by location
    pub title: String,

    /// HTML content
    pub content: String,

    /// Short description used for SEO
    pub description: Option<String>,

    /// Template type, e.g. `destination`
    pub template: String,

    /// Header image
    pub header_image: Option<String>,

    /// Overrides the title in meta tags
    pub meta_title: Option<String>,

    /// Meta description
    pub meta_description: Option<String>,

    /// Meta keywords, comma separated
    pub meta_keywords: Option<String>,

    /// Featured on overview pages
    pub featured: bool,

    /// Visible on the public site
    pub published: bool,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Sort order, lowest first
    pub ranking: i32,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl Page {
    /// Can the public see this page?
    pub fn is_visible(&self) -> bool {
        self.published && !self.is_deleted
    }

    /// Does the page render as a destination?
    pub fn is_destination(&self) -> bool {
        self.template == DESTINATION_TEMPLATE
    }
}
