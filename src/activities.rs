//! Activities, points of interest at a location

use chrono::naive::NaiveDateTime;

/// Something to do at a location
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Activity {
    pub id: i32,
    pub name: String,

    /// Location name, matched against page titles and destination names
    pub location: String,

    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub is_deleted: bool,
    pub ranking: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Activity {
    /// Can the public see this activity?
    pub fn is_visible(&self) -> bool {
        self.published && !self.is_deleted
    }

    /// Is this activity located at `location`?
    ///
    /// There is no relation in storage, only the names are compared
    pub fn is_at(&self, location: &str) -> bool {
        self.location.trim().to_lowercase() == location.trim().to_lowercase()
    }
}
