//! Highlights shown on the homepage

/// A highlight with an icon
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Highlight {
    pub id: i32,
    pub name: String,
    pub icon_path: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub ranking: i32,
    pub published: bool,
    pub show_on_homepage: bool,
    pub is_deleted: bool,
}

impl Highlight {
    /// Is the highlight visible on the homepage?
    pub fn is_visible(&self) -> bool {
        self.published && self.show_on_homepage && !self.is_deleted
    }
}
