use axum::http::StatusCode;

use crate::storage::Memory;
use crate::tests::fixtures;
use crate::tests::helper;

#[tokio::test]
async fn test_activities() {
    let storage = Memory::new();
    storage
        .insert_activity(fixtures::activity(1, "Wawel", "Krakau"))
        .await;

    let mut featured = fixtures::activity(2, "Lange Markt", "Gdańsk");
    featured.featured = true;
    storage.insert_activity(featured).await;

    let mut unpublished = fixtures::activity(3, "Zoutmijn", "krakau");
    unpublished.published = false;
    storage.insert_activity(unpublished).await;

    storage
        .insert_activity(fixtures::activity(4, "Kazimierz", " KRAKAU "))
        .await;

    let mut app = helper::setup_test_app(storage);

    let (status_code, body) = helper::get(&mut app, "/api/activities").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(3, body.as_array().unwrap().len());

    let (status_code, body) = helper::get(&mut app, "/api/activities?featured=true").await;
    assert_eq!(StatusCode::OK, status_code);
    let activities = body.as_array().unwrap();
    assert_eq!(1, activities.len());
    assert_eq!("Lange Markt", activities[0]["name"]);

    let (status_code, body) = helper::get(&mut app, "/api/activities/location/krakau").await;
    assert_eq!(StatusCode::OK, status_code);
    let names = body
        .as_array()
        .unwrap()
        .iter()
        .map(|activity| activity["name"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(vec!["Wawel", "Kazimierz"], names);

    let (status_code, body) = helper::get(&mut app, "/api/activities/location/Warschau").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(body.as_array().unwrap().is_empty());
}
