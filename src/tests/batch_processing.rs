use axum::http::StatusCode;

use crate::storage::Memory;
use crate::tests::fixtures;
use crate::tests::helper;
use crate::tests::helper::Status;

async fn seeded_storage() -> Memory {
    let storage = Memory::new();

    // on the CDN
    storage
        .insert_destination(fixtures::destination(1, "krakow", "Krakau"))
        .await;

    // local, unpublished still counts
    let mut gdansk = fixtures::destination(2, "gdansk", "Gdańsk");
    gdansk.header_image = Some(fixtures::LOCAL_IMAGE.to_string());
    gdansk.published = false;
    storage.insert_destination(gdansk).await;

    // soft-deleted never counts
    let mut deleted = fixtures::destination(3, "lodz", "Łódź");
    deleted.is_deleted = Some(true);
    storage.insert_destination(deleted).await;

    // local
    storage.insert_guide(fixtures::guide(1, "trein", "Trein")).await;

    // on the CDN
    let mut guide = fixtures::guide(2, "tatra", "Tatra");
    guide.header_image = Some(fixtures::CDN_IMAGE.to_string());
    storage.insert_guide(guide).await;

    storage
}

#[tokio::test]
async fn test_status() {
    let mut app = helper::setup_test_app(seeded_storage().await);

    let (status_code, status) = helper::status(&mut app, "/api/ai/batch-processing/status").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(
        Some(Status {
            total: 4,
            cloudinary: 2,
            local: 2,
            destinations: (2, 1),
            guides: (2, 1),
            status: "ready".to_string(),
        }),
        status
    );
}

#[tokio::test]
async fn test_status_is_idempotent() {
    let mut app = helper::setup_test_app(seeded_storage().await);

    let (_, first) = helper::status(&mut app, "/api/ai/batch-processing/status").await;
    let (_, second) = helper::status(&mut app, "/api/ai/batch-processing/status").await;

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_status_aliases() {
    let mut app = helper::setup_test_app(seeded_storage().await);

    let (_, expected) = helper::status(&mut app, "/api/ai/batch-processing/status").await;

    for alias in [
        "/api/ai-status",
        "/api/ai-batch-status",
        "/api/batch-processing-status",
        "/api/images/ai-status",
    ] {
        let (status_code, status) = helper::status(&mut app, alias).await;
        assert_eq!(StatusCode::OK, status_code, "{alias}");
        assert_eq!(expected, status, "{alias}");
    }
}

#[tokio::test]
async fn test_start_does_not_change_status() {
    let mut app = helper::setup_test_app(seeded_storage().await);

    let (_, before) = helper::status(&mut app, "/api/ai/batch-processing/status").await;

    let (status_code, body) = helper::post(&mut app, "/api/ai/batch-processing/start", "", false).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("AI batch processing started", body["message"]);
    assert_eq!("initiated", body["status"]);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    let (status_code, body) = helper::post(&mut app, "/api/ai-start", "", false).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("started", body["status"]);

    let (_, after) = helper::status(&mut app, "/api/ai/batch-processing/status").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_status_without_content() {
    let mut app = helper::setup_test_app(Memory::new());

    let (status_code, status) = helper::status(&mut app, "/api/ai-status").await;
    assert_eq!(StatusCode::OK, status_code);

    let status = status.unwrap();
    assert_eq!(0, status.total);
    assert_eq!((0, 0), status.destinations);
}
