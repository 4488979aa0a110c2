//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::activities::Activity;
use crate::destinations::Destination;
use crate::guides::Guide;
use crate::highlights::Highlight;
use crate::motivation::Motivation;
use crate::pages::Page;
use crate::site_settings::SiteSettings;

use super::ContentFilter;
use super::ImageCounts;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All destinations in storage
    destinations: Arc<Mutex<HashMap<i32, Destination>>>,

    /// All guides in storage
    guides: Arc<Mutex<HashMap<i32, Guide>>>,

    /// All pages in storage
    pages: Arc<Mutex<HashMap<i32, Page>>>,

    /// All activities in storage
    activities: Arc<Mutex<HashMap<i32, Activity>>>,

    /// All highlights in storage
    highlights: Arc<Mutex<HashMap<i32, Highlight>>>,

    /// The site settings singleton
    site_settings: Arc<Mutex<Option<SiteSettings>>>,

    /// The motivation singleton
    motivation: Arc<Mutex<Option<Motivation>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort rows the way the listings are ordered: ranking first, then ID
fn sorted_by_ranking<T, F>(mut rows: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> (i32, i32),
{
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl Storage for Memory {
    async fn find_destinations(&self, filter: &ContentFilter) -> Result<Vec<Destination>> {
        let destinations: Vec<Destination> = self
            .destinations
            .lock()
            .await
            .values()
            .filter(|destination| destination.is_visible())
            .filter(|destination| !filter.homepage_only || destination.show_on_homepage)
            .cloned()
            .collect();

        Ok(sorted_by_ranking(destinations, |d| (d.ranking, d.id)))
    }

    async fn find_single_destination_by_slug(&self, slug: &str) -> Result<Option<Destination>> {
        Ok(self
            .destinations
            .lock()
            .await
            .values()
            .find(|destination| destination.slug == slug)
            .cloned())
    }

    async fn find_guides(&self, filter: &ContentFilter) -> Result<Vec<Guide>> {
        let guides: Vec<Guide> = self
            .guides
            .lock()
            .await
            .values()
            .filter(|guide| guide.is_visible())
            .filter(|guide| !filter.homepage_only || guide.show_on_homepage)
            .cloned()
            .collect();

        Ok(sorted_by_ranking(guides, |g| (g.ranking, g.id)))
    }

    async fn find_single_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        Ok(self
            .guides
            .lock()
            .await
            .values()
            .find(|guide| guide.slug == slug)
            .cloned())
    }

    async fn find_pages(&self, filter: &ContentFilter) -> Result<Vec<Page>> {
        let pages: Vec<Page> = self
            .pages
            .lock()
            .await
            .values()
            .filter(|page| page.is_visible())
            .filter(|page| !filter.featured_only || page.featured)
            .cloned()
            .collect();

        Ok(sorted_by_ranking(pages, |p| (p.ranking, p.id)))
    }

    async fn find_single_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        Ok(self
            .pages
            .lock()
            .await
            .values()
            .find(|page| page.slug == slug)
            .cloned())
    }

    async fn find_activities(&self, filter: &ContentFilter) -> Result<Vec<Activity>> {
        let activities: Vec<Activity> = self
            .activities
            .lock()
            .await
            .values()
            .filter(|activity| activity.is_visible())
            .filter(|activity| !filter.featured_only || activity.featured)
            .cloned()
            .collect();

        Ok(sorted_by_ranking(activities, |a| (a.ranking, a.id)))
    }

    async fn find_activities_by_location(&self, location: &str) -> Result<Vec<Activity>> {
        let activities: Vec<Activity> = self
            .activities
            .lock()
            .await
            .values()
            .filter(|activity| activity.is_visible() && activity.is_at(location))
            .cloned()
            .collect();

        Ok(sorted_by_ranking(activities, |a| (a.ranking, a.id)))
    }

    async fn find_highlights(&self, limit: i64) -> Result<Vec<Highlight>> {
        let highlights: Vec<Highlight> = self
            .highlights
            .lock()
            .await
            .values()
            .filter(|highlight| highlight.is_visible())
            .cloned()
            .collect();

        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(sorted_by_ranking(highlights, |h| (h.ranking, h.id))
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn find_site_settings(&self) -> Result<Option<SiteSettings>> {
        Ok(self.site_settings.lock().await.clone())
    }

    async fn find_motivation(&self) -> Result<Option<Motivation>> {
        Ok(self.motivation.lock().await.clone())
    }

    async fn count_destination_images(&self) -> Result<ImageCounts> {
        Ok(ImageCounts::from_images(
            self.destinations
                .lock()
                .await
                .values()
                .filter(|destination| !destination.is_deleted())
                .map(|destination| destination.header_image.as_deref()),
        ))
    }

    async fn count_guide_images(&self) -> Result<ImageCounts> {
        Ok(ImageCounts::from_images(
            self.guides
                .lock()
                .await
                .values()
                .filter(|guide| !guide.is_deleted())
                .map(|guide| guide.header_image.as_deref()),
        ))
    }
}

/// Seeding, the content is managed outside of this service
#[cfg(test)]
impl Memory {
    pub async fn insert_destination(&self, destination: Destination) {
        self.destinations
            .lock()
            .await
            .insert(destination.id, destination);
    }

    pub async fn insert_guide(&self, guide: Guide) {
        self.guides.lock().await.insert(guide.id, guide);
    }

    pub async fn insert_page(&self, page: Page) {
        self.pages.lock().await.insert(page.id, page);
    }

    pub async fn insert_activity(&self, activity: Activity) {
        self.activities.lock().await.insert(activity.id, activity);
    }

    pub async fn insert_highlight(&self, highlight: Highlight) {
        self.highlights.lock().await.insert(highlight.id, highlight);
    }

    pub async fn set_site_settings(&self, site_settings: SiteSettings) {
        *self.site_settings.lock().await = Some(site_settings);
    }

    pub async fn set_motivation(&self, motivation: Motivation) {
        *self.motivation.lock().await = Some(motivation);
    }
}
