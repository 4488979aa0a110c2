//! AI batch processing endpoints
//!
//! Processing happens on the CDN when an image URL is requested, there are no jobs to track.
//! Starting a batch is acknowledged and nothing else.

use axum::Extension;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;

use crate::storage::ImageCounts;
use crate::storage::Storage;

use super::Error;
use super::Success;

/// Images of one content type
#[derive(Debug, Serialize)]
pub struct ContentStatus {
    pub total: i64,

    /// Images on the CDN, these are processed on request
    pub processed: i64,
}

impl From<ImageCounts> for ContentStatus {
    fn from(counts: ImageCounts) -> Self {
        Self {
            total: counts.total,
            processed: counts.cloudinary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total: i64,
    pub cloudinary: i64,
    pub local: i64,
    pub destinations: ContentStatus,
    pub guides: ContentStatus,
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

/// Same format as `Date.toISOString`, the client parses it
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Where the images of destinations and guides are hosted
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/ai/batch-processing/status
/// ```
///
/// Response:
/// ```json
/// {
///   "total": 12, "cloudinary": 9, "local": 3,
///   "destinations": { "total": 8, "processed": 6 },
///   "guides": { "total": 4, "processed": 3 },
///   "status": "ready", "timestamp": "2025-06-01T12:00:00.000Z"
/// }
/// ```
pub async fn status<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<StatusResponse>, Error> {
    let destinations = storage
        .count_destination_images()
        .await
        .map_err(Error::internal_server_error)?;

    let guides = storage
        .count_guide_images()
        .await
        .map_err(Error::internal_server_error)?;

    let all = destinations + guides;

    tracing::debug!(
        "Images: {} total, {} on the CDN, {} local",
        all.total,
        all.cloudinary,
        all.local
    );

    Ok(Success::ok(StatusResponse {
        total: all.total,
        cloudinary: all.cloudinary,
        local: all.local,
        destinations: destinations.into(),
        guides: guides.into(),
        status: "ready",
        timestamp: timestamp(),
    }))
}

fn start_response(status: &'static str) -> Success<StartResponse> {
    tracing::info!("AI batch processing requested");

    Success::ok(StartResponse {
        message: "AI batch processing started",
        status,
        timestamp: timestamp(),
    })
}

/// Acknowledge a batch start
///
/// Request:
/// ```sh
/// curl -v -X POST http://localhost:6000/api/ai/batch-processing/start
/// ```
///
/// Response:
/// ```json
/// { "message": "AI batch processing started", "status": "initiated", "timestamp": "..." }
/// ```
pub async fn start() -> Success<StartResponse> {
    start_response("initiated")
}

/// Acknowledge a batch start, the flat route reports `started`
///
/// Request:
/// ```sh
/// curl -v -X POST http://localhost:6000/api/ai-start
/// ```
pub async fn start_flat() -> Success<StartResponse> {
    start_response("started")
}
