use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::header::USER_AGENT;
use http_body_util::BodyExt;
use serde_json::Map;
use serde_json::Value;
use tower::Service;
use url::Url;

use crate::cache::QueryCache;
use crate::create_router;
use crate::seo::SiteUrl;
use crate::storage::Memory;
use crate::storage::Storage;

/// Test helper version of Destination struct
#[derive(Debug, PartialEq, Eq)]
pub struct Destination {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

/// Test helper version of the batch processing status
#[derive(Debug, PartialEq, Eq)]
pub struct Status {
    pub total: i64,
    pub cloudinary: i64,
    pub local: i64,

    /// Total and processed
    pub destinations: (i64, i64),

    /// Total and processed
    pub guides: (i64, i64),

    pub status: String,
}

/// Error response
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    pub error: String,
    pub description: Option<String>,
}

/// Setup the app on top of the given storage, without caching
pub fn setup_test_app<S: Storage>(storage: S) -> Router {
    create_router(storage, QueryCache::disabled(), site_url())
}

/// Setup the app on top of the given storage, with caching
pub fn setup_test_app_with_cache(storage: Memory) -> Router {
    create_router(storage, QueryCache::new(Duration::from_secs(60)), site_url())
}

fn site_url() -> SiteUrl {
    SiteUrl(Url::parse("https://o2-phi.vercel.app").unwrap())
}

pub async fn request(
    app: &mut Router,
    method: Method,
    uri: &str,
    user_agent: Option<&str>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(user_agent) = user_agent {
        request = request.header(USER_AGENT, user_agent);
    }

    let response = app
        .call(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status_code = response.status();
    let headers = response.headers().clone();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, headers, body)
}

/// GET some JSON
pub async fn get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let (status_code, _, body) = request(app, Method::GET, uri, None).await;

    (status_code, serde_json::from_slice::<Value>(&body[..]).unwrap())
}

/// POST a raw body, with or without the JSON content type
pub async fn post(
    app: &mut Router,
    uri: &str,
    body: &str,
    with_content_type: bool,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(Method::POST).uri(uri);

    if with_content_type {
        request = request.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    }

    let response = app
        .call(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status_code = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, serde_json::from_slice::<Value>(&body[..]).unwrap())
}

pub async fn single_destination(
    app: &mut Router,
    slug: &str,
) -> (StatusCode, Option<Destination>, Option<Error>) {
    let (status_code, body) = get(app, &format!("/api/destinations/{slug}")).await;

    if status_code == StatusCode::OK {
        (
            status_code,
            body.as_object().map(value_to_destination),
            None,
        )
    } else {
        (status_code, None, Some(get_error(&body)))
    }
}

pub async fn list_destinations(app: &mut Router, uri: &str) -> (StatusCode, Vec<Destination>) {
    let (status_code, body) = get(app, uri).await;

    let destinations = body
        .as_array()
        .map(|destinations| {
            destinations
                .iter()
                .map(|destination| destination.as_object().unwrap())
                .map(value_to_destination)
                .collect()
        })
        .unwrap_or_default();

    (status_code, destinations)
}

pub async fn status(app: &mut Router, uri: &str) -> (StatusCode, Option<Status>) {
    let (status_code, body) = get(app, uri).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            body.as_object().map(value_to_status)
        } else {
            None
        },
    )
}

fn value_to_destination(destination: &Map<String, Value>) -> Destination {
    Destination {
        id: destination["id"].as_i64().unwrap(),
        slug: destination["slug"].as_str().map(ToString::to_string).unwrap(),
        name: destination["name"].as_str().map(ToString::to_string).unwrap(),
    }
}

fn totals(value: &Value) -> (i64, i64) {
    (
        value["total"].as_i64().unwrap(),
        value["processed"].as_i64().unwrap(),
    )
}

fn value_to_status(status: &Map<String, Value>) -> Status {
    Status {
        total: status["total"].as_i64().unwrap(),
        cloudinary: status["cloudinary"].as_i64().unwrap(),
        local: status["local"].as_i64().unwrap(),
        destinations: totals(&status["destinations"]),
        guides: totals(&status["guides"]),
        status: status["status"].as_str().map(ToString::to_string).unwrap(),
    }
}

pub fn get_error(body: &Value) -> Error {
    Error {
        error: body["error"].as_str().map(ToString::to_string).unwrap(),
        description: body
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    }
}
