//! Guides, long-form travel articles

use chrono::naive::NaiveDateTime;

/// A travel guide
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Guide {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub header_image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub published: bool,
    pub is_deleted: Option<bool>,
    pub show_on_homepage: bool,
    pub ranking: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Guide {
    /// Is the guide soft-deleted?
    pub fn is_deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }

    /// Can the public see this guide?
    pub fn is_visible(&self) -> bool {
        self.published && !self.is_deleted()
    }
}
