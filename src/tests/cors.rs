use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;

use crate::storage::Memory;
use crate::tests::helper;

#[tokio::test]
async fn test_options_is_answered() {
    let mut app = helper::setup_test_app(Memory::new());

    for uri in [
        "/api/ai/batch-processing/status",
        "/api/ai/batch-processing/start",
        "/api/destinations/homepage",
        "/api/destinations/krakow",
        "/api/seo-data",
        "/api/site-settings",
        "/api/auth/status",
    ] {
        let (status_code, headers, body) = helper::request(&mut app, Method::OPTIONS, uri, None).await;

        assert_eq!(StatusCode::OK, status_code, "{uri}");
        assert!(body.is_empty(), "{uri}");
        assert_eq!(
            Some("*"),
            headers
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_responses_allow_any_origin() {
    let mut app = helper::setup_test_app(Memory::new());

    let (status_code, headers, _) =
        helper::request(&mut app, Method::GET, "/api/auth/status", None).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("*", headers[ACCESS_CONTROL_ALLOW_ORIGIN]);

    let (status_code, headers, _) =
        helper::request(&mut app, Method::GET, "/api/destinations/krakow", None).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("*", headers[ACCESS_CONTROL_ALLOW_ORIGIN]);
}

#[tokio::test]
async fn test_method_not_allowed() {
    let mut app = helper::setup_test_app(Memory::new());

    let (status_code, body) = helper::post(&mut app, "/api/ai/batch-processing/status", "", false).await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, status_code);
    assert_eq!("Method not allowed", helper::get_error(&body).error);

    let (status_code, headers, body) =
        helper::request(&mut app, Method::GET, "/api/ai-start", None).await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, status_code);
    assert_eq!("*", headers[ACCESS_CONTROL_ALLOW_ORIGIN]);
    assert_eq!(
        serde_json::json!({ "error": "Method not allowed" }),
        serde_json::from_slice::<serde_json::Value>(&body[..]).unwrap()
    );

    let (status_code, _, _) =
        helper::request(&mut app, Method::DELETE, "/api/destinations/krakow", None).await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, status_code);
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let mut app = helper::setup_test_app(Memory::new());

    let (status_code, body) = helper::get(&mut app, "/api/does-not-exist").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("API endpoint not found", body["error"]);
    assert_eq!("/does-not-exist", body["path"]);
    assert_eq!("GET", body["method"]);
    assert!(
        body["available"]
            .as_array()
            .unwrap()
            .contains(&serde_json::Value::from("/auth/status"))
    );

    let (status_code, body) = helper::get(&mut app, "/api/destinations/krakow/notes").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("API endpoint not found", body["error"]);
}
