//! End-to-end tests: real sockets, real fixture directory, real backend.

use std::fs;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_fixture_served_instead_of_backend() {
    let backend = common::start_mock_backend("from backend").await;
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(
        fixtures.path().join("users-_id.json"),
        r#"{"id": 42, "name": "Ada"}"#,
    )
    .unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), true).await;
    let res = common::client()
        .get(proxy.url("/api/users/42?expand=roles"))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    assert_eq!(res.headers()["x-mock-by"], "fixture-proxy");
    assert_eq!(res.headers()["x-mock-file"], "users-_id.json");
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"id": 42, "name": "Ada"}));
}

#[tokio::test]
async fn test_method_specific_fixture() {
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(fixtures.path().join("auth-logout.delete.json"), r#"{"bye": true}"#).unwrap();
    fs::write(fixtures.path().join("auth-logout.json"), r#"{"bye": false}"#).unwrap();

    let proxy = common::start_proxy(fixtures.path(), None, true).await;
    let res = common::client()
        .delete(proxy.url("/dev-api/auth/logout"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-mock-file"], "auth-logout.delete.json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"bye": true}));
}

#[tokio::test]
async fn test_missing_fixture_forwards_to_backend() {
    let backend = common::start_mock_backend("from backend").await;
    let fixtures = tempfile::tempdir().unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), true).await;
    let res = common::client()
        .post(proxy.url("/api/orders"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("x-mock-by").is_none());
    assert_eq!(res.text().await.unwrap(), "from backend");
}

#[tokio::test]
async fn test_disabled_toggle_forwards_everything() {
    let backend = common::start_mock_backend("from backend").await;
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(fixtures.path().join("users.json"), "[]").unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), false).await;
    let res = common::client()
        .get(proxy.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert!(res.headers().get("x-mock-file").is_none());
    assert_eq!(res.text().await.unwrap(), "from backend");
}

#[tokio::test]
async fn test_outside_allowlist_forwards() {
    let backend = common::start_mock_backend("static asset").await;
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(fixtures.path().join("assets-app.js.json"), "{}").unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), true).await;
    let res = common::client()
        .get(proxy.url("/assets/app.js"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.text().await.unwrap(), "static asset");
}

#[tokio::test]
async fn test_invalid_fixture_falls_through() {
    let backend = common::start_mock_backend("from backend").await;
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(fixtures.path().join("reports.json"), "{ not json").unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), true).await;
    let res = common::client()
        .get(proxy.url("/api/reports"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "from backend");
}

#[tokio::test]
async fn test_fixture_changes_picked_up_without_restart() {
    let fixtures = tempfile::tempdir().unwrap();
    let path = fixtures.path().join("status.json");
    fs::write(&path, r#"{"v": 1}"#).unwrap();

    let proxy = common::start_proxy(fixtures.path(), None, true).await;
    let client = common::client();

    let first: Value = client.get(proxy.url("/api/status")).send().await.unwrap().json().await.unwrap();
    fs::write(&path, r#"{"v": 2}"#).unwrap();
    let second: Value = client.get(proxy.url("/api/status")).send().await.unwrap().json().await.unwrap();

    assert_eq!(first, json!({"v": 1}));
    assert_eq!(second, json!({"v": 2}));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let backend = common::start_mock_backend("from backend").await;
    let fixtures = tempfile::tempdir().unwrap();
    fs::write(fixtures.path().join("items-_id.json"), r#"{"item": true}"#).unwrap();

    let proxy = common::start_proxy(fixtures.path(), Some(backend), true).await;
    let client = common::client();

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = if i % 2 == 0 {
            proxy.url(&format!("/api/items/{i}"))
        } else {
            proxy.url("/api/unmocked")
        };
        handles.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            let mocked = res.headers().contains_key("x-mock-file");
            (i, mocked)
        }));
    }

    for handle in handles {
        let (i, mocked) = handle.await.unwrap();
        assert_eq!(mocked, i % 2 == 0, "request {i}");
    }
}
