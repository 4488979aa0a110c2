use axum::http::StatusCode;

use crate::storage::Memory;
use crate::tests::fixtures;
use crate::tests::helper;

#[tokio::test]
async fn test_guides() {
    let storage = Memory::new();
    storage
        .insert_guide(fixtures::guide(1, "reizen-met-de-trein", "Reizen met de trein"))
        .await;

    let mut hidden = fixtures::guide(2, "oud", "Oude gids");
    hidden.show_on_homepage = false;
    storage.insert_guide(hidden).await;

    let mut deleted = fixtures::guide(3, "weg", "Verwijderd");
    deleted.is_deleted = Some(true);
    storage.insert_guide(deleted).await;

    let mut app = helper::setup_test_app(storage);

    let (status_code, body) = helper::get(&mut app, "/api/guides/homepage").await;
    assert_eq!(StatusCode::OK, status_code);
    let guides = body.as_array().unwrap();
    assert_eq!(1, guides.len());
    assert_eq!("Reizen met de trein", guides[0]["title"]);

    let (status_code, body) = helper::get(&mut app, "/api/guides").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(2, body.as_array().unwrap().len());

    let (status_code, body) = helper::get(&mut app, "/api/guides/oud").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("Oude gids", body["title"]);

    let (status_code, body) = helper::get(&mut app, "/api/guides/weg").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Guide not found", helper::get_error(&body).error);
}
