//! Motivation, the call-to-action block

/// The singleton call-to-action
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Motivation {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image: Option<String>,
    pub is_published: bool,
}
