//! Postgres storage

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::QueryBuilder;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::postgres::PgRow;
use sqlx::postgres::PgSslMode;

use crate::activities::Activity;
use crate::destinations::Destination;
use crate::guides::Guide;
use crate::highlights::Highlight;
use crate::images::CDN_URL_PREFIX;
use crate::motivation::Motivation;
use crate::pages::Page;
use crate::site_settings::SiteSettings;

use super::ContentFilter;
use super::Error;
use super::ImageCounts;
use super::Result;
use super::Storage;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// How to connect to Postgres
#[derive(Clone, Debug)]
pub struct Config {
    /// Connection string
    pub url: String,

    /// Upper bound of the pool, serverless deployments use 1
    pub max_connections: u32,

    /// Require TLS without verifying the certificate, like hosted databases in production need
    pub require_tls: bool,
}

/// A content listing: which table and which columns the filters map to
struct Listing {
    /// Table to select from
    table: &'static str,

    /// Condition for rows the public can see
    visibility: &'static str,

    /// Column for [`ContentFilter::homepage_only`]
    homepage_column: Option<&'static str>,

    /// Column for [`ContentFilter::featured_only`]
    featured_column: Option<&'static str>,
}

/// Destinations and guides share the same soft-delete that allows `NULL`
const SOFT_DELETE_VISIBILITY: &str = "published = true AND (is_deleted = false OR is_deleted IS NULL)";

/// Pages and activities have a non-null soft-delete
const VISIBILITY: &str = "published = true AND is_deleted = false";

const DESTINATIONS: Listing = Listing {
    table: "destinations",
    visibility: SOFT_DELETE_VISIBILITY,
    homepage_column: Some("show_on_homepage"),
    featured_column: None,
};

const GUIDES: Listing = Listing {
    table: "guides",
    visibility: SOFT_DELETE_VISIBILITY,
    homepage_column: Some("show_on_homepage"),
    featured_column: None,
};

const PAGES: Listing = Listing {
    table: "pages",
    visibility: VISIBILITY,
    homepage_column: None,
    featured_column: Some("featured"),
};

const ACTIVITIES: Listing = Listing {
    table: "activities",
    visibility: VISIBILITY,
    homepage_column: None,
    featured_column: Some("featured"),
};

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Connect to Postgres
    ///
    /// Migrations will be run
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let ssl_mode = if config.require_tls {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        let options = PgConnectOptions::from_str(&config.url)
            .context("Invalid DATABASE_URL")?
            .ssl_mode(ssl_mode);

        let connection_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .context("Could not connect to the database")?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> anyhow::Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .context("Migrations could not run")?;

        Ok(Self { connection_pool })
    }

    /// Fetch a content listing
    async fn fetch_listing<T>(&self, listing: &Listing, filter: &ContentFilter) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = QueryBuilder::<sqlx::Postgres>::new("SELECT * FROM ");
        query.push(listing.table);
        query.push(" WHERE ");
        query.push(listing.visibility);

        if let (true, Some(column)) = (filter.homepage_only, listing.homepage_column) {
            query.push(" AND ").push(column).push(" = true");
        }

        if let (true, Some(column)) = (filter.featured_only, listing.featured_column) {
            query.push(" AND ").push(column).push(" = true");
        }

        query.push(" ORDER BY ranking ASC, id ASC");

        query
            .build_query_as::<T>()
            .fetch_all(&self.connection_pool)
            .await
            .map_err(connection_error)
    }

    /// Fetch a single row by slug, visible or not
    async fn fetch_by_slug<T>(&self, table: &'static str, slug: &str) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = QueryBuilder::<sqlx::Postgres>::new("SELECT * FROM ");
        query.push(table);
        query.push(" WHERE slug = ").push_bind(slug).push(" LIMIT 1");

        query
            .build_query_as::<T>()
            .fetch_optional(&self.connection_pool)
            .await
            .map_err(connection_error)
    }

    /// Count the header images of a table with the nullable soft-delete
    async fn count_images(&self, table: &'static str) -> Result<ImageCounts> {
        let mut query = QueryBuilder::<sqlx::Postgres>::new(
            r"
            SELECT
                COUNT(*) AS total,
                COUNT(CASE WHEN header_image LIKE ",
        );
        query.push_bind(format!("{CDN_URL_PREFIX}%"));
        query.push(
            r" THEN 1 END) AS cloudinary,
                COUNT(CASE WHEN header_image NOT LIKE ",
        );
        query.push_bind(format!("{CDN_URL_PREFIX}%"));
        query.push(" THEN 1 END) AS local FROM ");
        query.push(table);
        query.push(" WHERE is_deleted = false OR is_deleted IS NULL");

        let (total, cloudinary, local) = query
            .build_query_as::<(i64, i64, i64)>()
            .fetch_one(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(ImageCounts {
            total,
            cloudinary,
            local,
        })
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn find_destinations(&self, filter: &ContentFilter) -> Result<Vec<Destination>> {
        self.fetch_listing(&DESTINATIONS, filter).await
    }

    async fn find_single_destination_by_slug(&self, slug: &str) -> Result<Option<Destination>> {
        self.fetch_by_slug(DESTINATIONS.table, slug).await
    }

    async fn find_guides(&self, filter: &ContentFilter) -> Result<Vec<Guide>> {
        self.fetch_listing(&GUIDES, filter).await
    }

    async fn find_single_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        self.fetch_by_slug(GUIDES.table, slug).await
    }

    async fn find_pages(&self, filter: &ContentFilter) -> Result<Vec<Page>> {
        self.fetch_listing(&PAGES, filter).await
    }

    async fn find_single_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        self.fetch_by_slug(PAGES.table, slug).await
    }

    async fn find_activities(&self, filter: &ContentFilter) -> Result<Vec<Activity>> {
        self.fetch_listing(&ACTIVITIES, filter).await
    }

    async fn find_activities_by_location(&self, location: &str) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r"
            SELECT *
            FROM activities
            WHERE published = true
                AND is_deleted = false
                AND LOWER(TRIM(location)) = LOWER(TRIM($1))
            ORDER BY ranking ASC, id ASC
            ",
        )
        .bind(location)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(activities)
    }

    async fn find_highlights(&self, limit: i64) -> Result<Vec<Highlight>> {
        let highlights = sqlx::query_as::<_, Highlight>(
            r"
            SELECT *
            FROM highlights
            WHERE published = true
                AND show_on_homepage = true
                AND is_deleted = false
            ORDER BY ranking ASC, id ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(highlights)
    }

    async fn find_site_settings(&self) -> Result<Option<SiteSettings>> {
        let site_settings = sqlx::query_as::<_, SiteSettings>(
            r"
            SELECT *
            FROM site_settings
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(site_settings)
    }

    async fn find_motivation(&self) -> Result<Option<Motivation>> {
        let motivation = sqlx::query_as::<_, Motivation>(
            r"
            SELECT *
            FROM motivation
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(motivation)
    }

    async fn count_destination_images(&self) -> Result<ImageCounts> {
        self.count_images(DESTINATIONS.table).await
    }

    async fn count_guide_images(&self) -> Result<ImageCounts> {
        self.count_images(GUIDES.table).await
    }
}

/// Convert `SQLx` to storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
