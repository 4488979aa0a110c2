//! Site-wide API endpoints: settings, motivation and authentication status

use axum::Extension;
use serde::Serialize;
use serde_json::Value;

use crate::cache::QueryCache;
use crate::motivation::Motivation;
use crate::storage::Storage;

use super::Error;
use super::Success;
use super::cached;

/// Motivation response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationResponse {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image: Option<String>,
    pub is_published: bool,
}

impl MotivationResponse {
    fn from_motivation(motivation: Motivation) -> Self {
        Self {
            title: motivation.title,
            description: motivation.description,
            button_text: motivation.button_text,
            button_link: motivation.button_link,
            image: motivation.image,
            is_published: motivation.is_published,
        }
    }
}

/// Site settings, or the defaults when none are configured
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/site-settings
/// ```
///
/// Response:
/// ```json
/// { "siteName": "Ontdek Polen", "showDestinations": true ... }
/// ```
pub async fn site_settings<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(cache): Extension<QueryCache>,
) -> Result<Success<Value>, Error> {
    cached(&cache, "site-settings", async {
        storage
            .find_site_settings()
            .await
            .map(Option::unwrap_or_default)
    })
    .await
    .map(Success::ok)
}

/// The call-to-action block
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/motivation
/// ```
pub async fn motivation<S: Storage>(
    Extension(storage): Extension<S>,
    Extension(cache): Extension<QueryCache>,
) -> Result<Success<Value>, Error> {
    let motivation = cached(&cache, "motivation", async {
        storage
            .find_motivation()
            .await
            .map(|motivation| motivation.map(MotivationResponse::from_motivation))
    })
    .await?;

    if motivation.is_null() {
        return Err(Error::not_found("Motivation not found"));
    }

    Ok(Success::ok(motivation))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    is_authenticated: bool,
    message: &'static str,
}

/// Authentication status, there are no accounts so nobody is ever signed in
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/auth/status
/// ```
pub async fn auth_status() -> Success<AuthStatus> {
    Success::ok(AuthStatus {
        is_authenticated: false,
        message: "Authentication service available",
    })
}
