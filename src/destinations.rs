//! Destinations
//!
//! Places in Poland with their own landing page

use chrono::naive::NaiveDateTime;

/// A destination, e.g. Kraków or the Tatra mountains
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Destination {
    /// Destination ID
    pub id: i32,

    /// External identifier used in the URL
    pub slug: String,

    /// Display name
    pub name: String,

    /// Short description shown on cards
    pub description: String,

    /// Header image, a CDN URL or a local path
    pub header_image: Option<String>,

    /// Pre-processed image with the AI transformations applied
    pub ai_image: Option<String>,

    /// Alternative text of the header image
    pub alt: Option<String>,

    /// Link the destination card points to
    pub link: Option<String>,

    /// Visible on the public site
    pub published: bool,

    /// Soft-delete flag, `NULL` counts as not deleted
    pub is_deleted: Option<bool>,

    /// Listed on the homepage
    pub show_on_homepage: bool,

    /// Sort order, lowest first
    pub ranking: i32,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl Destination {
    /// Is the destination soft-deleted?
    pub fn is_deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }

    /// Can the public see this destination?
    pub fn is_visible(&self) -> bool {
        self.published && !self.is_deleted()
    }
}
