//! All things related to the storage of the site content

use core::fmt;

use async_trait::async_trait;

use crate::activities::Activity;
use crate::destinations::Destination;
use crate::guides::Guide;
use crate::highlights::Highlight;
use crate::motivation::Motivation;
use crate::pages::Page;
use crate::site_settings::SiteSettings;

pub use memory::Memory;
pub use postgres::Config as PostgresConfig;
pub use postgres::Postgres;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Narrows down a content listing
///
/// The visibility rules of the content type always apply, these filters come on top
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContentFilter {
    /// Only rows flagged for the homepage
    pub homepage_only: bool,

    /// Only featured rows
    pub featured_only: bool,
}

impl ContentFilter {
    /// Everything that is visible
    pub fn all() -> Self {
        Self::default()
    }

    /// Only what is flagged for the homepage
    pub fn homepage() -> Self {
        Self {
            homepage_only: true,
            ..Self::default()
        }
    }

    /// Only featured content
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Self::default()
        }
    }
}

/// Where the images of a content type are hosted
///
/// Only rows that are not soft-deleted are counted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageCounts {
    /// All rows
    pub total: i64,

    /// Rows with an image on the CDN
    pub cloudinary: i64,

    /// Rows with an image somewhere else
    pub local: i64,
}

impl ImageCounts {
    /// Count the images of a list of rows
    pub fn from_images<'a, I>(images: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        images
            .into_iter()
            .fold(Self::default(), |mut counts, image| {
                counts.total += 1;

                match image {
                    Some(image) if crate::images::is_cdn_url(image) => counts.cloudinary += 1,
                    Some(_) => counts.local += 1,
                    None => {}
                }

                counts
            })
    }
}

impl core::ops::Add for ImageCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            cloudinary: self.cloudinary + other.cloudinary,
            local: self.local + other.local,
        }
    }
}

/// Storage with all supported operations
///
/// Everything is read-only, the content is managed elsewhere
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all destinations matching the filter
    ///
    /// Respects the visibility: published and not soft-deleted, ordered by ranking
    async fn find_destinations(&self, filter: &ContentFilter) -> Result<Vec<Destination>>;

    /// Find a single destination by slug
    ///
    /// DOES NOT respect the visibility, handle with care
    async fn find_single_destination_by_slug(&self, slug: &str) -> Result<Option<Destination>>;

    /// Find all guides matching the filter
    ///
    /// Respects the visibility: published and not soft-deleted, ordered by ranking
    async fn find_guides(&self, filter: &ContentFilter) -> Result<Vec<Guide>>;

    /// Find a single guide by slug
    ///
    /// DOES NOT respect the visibility, handle with care
    async fn find_single_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>>;

    /// Find all pages matching the filter
    ///
    /// Respects the visibility: published and not soft-deleted, ordered by ranking
    async fn find_pages(&self, filter: &ContentFilter) -> Result<Vec<Page>>;

    /// Find a single page by slug
    ///
    /// DOES NOT respect the visibility, handle with care
    async fn find_single_page_by_slug(&self, slug: &str) -> Result<Option<Page>>;

    /// Find all activities matching the filter
    ///
    /// Respects the visibility: published and not soft-deleted, ordered by ranking
    async fn find_activities(&self, filter: &ContentFilter) -> Result<Vec<Activity>>;

    /// Find all activities at a location, compared case-insensitive
    ///
    /// Respects the visibility
    async fn find_activities_by_location(&self, location: &str) -> Result<Vec<Activity>>;

    /// Find the highlights of the homepage, at most `limit`
    ///
    /// Respects the visibility
    async fn find_highlights(&self, limit: i64) -> Result<Vec<Highlight>>;

    /// Find the site settings, if they are configured
    async fn find_site_settings(&self) -> Result<Option<SiteSettings>>;

    /// Find the motivation block, if it is configured
    async fn find_motivation(&self) -> Result<Option<Motivation>>;

    /// Count the header images of all destinations that are not soft-deleted
    async fn count_destination_images(&self) -> Result<ImageCounts>;

    /// Count the header images of all guides that are not soft-deleted
    async fn count_guide_images(&self) -> Result<ImageCounts>;
}
