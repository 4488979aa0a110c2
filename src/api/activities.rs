//! Activities API endpoints

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::activities::Activity;
use crate::storage::Storage;

use super::Error;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::pages::ListQuery;

/// Activity response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub ranking: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ActivityResponse {
    fn from_activity(activity: Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            location: activity.location,
            category: activity.category,
            description: activity.description,
            image: activity.image,
            alt: activity.alt,
            link: activity.link,
            featured: activity.featured,
            published: activity.published,
            ranking: activity.ranking,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }

    fn from_activity_multiple(activities: Vec<Activity>) -> Vec<Self> {
        activities.into_iter().map(Self::from_activity).collect()
    }
}

/// List the published activities
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/activities?featured=true'
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    QueryParameters(query): QueryParameters<ListQuery>,
) -> Result<Success<Vec<ActivityResponse>>, Error> {
    let activities = storage
        .find_activities(&query.filter())
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(ActivityResponse::from_activity_multiple(
        activities,
    )))
}

/// List the published activities at a location
///
/// The location is the title of a page or the name of a destination, case does not matter
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/activities/location/Krakau
/// ```
pub async fn by_location<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(location): PathParameters<String>,
) -> Result<Success<Vec<ActivityResponse>>, Error> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::bad_request("Location is required"));
    }

    let activities = storage
        .find_activities_by_location(location)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Found {} activities at {location}", activities.len());

    Ok(Success::ok(ActivityResponse::from_activity_multiple(
        activities,
    )))
}
