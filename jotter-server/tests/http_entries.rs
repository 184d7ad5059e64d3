//! HTTP-level tests for the entry routes.
//!
//! Each test opens a fresh temporary database file, builds the router, and
//! drives it in-process with `tower::ServiceExt::oneshot`. Mutating posts
//! redirect back to the list view; `post_form_following` follows that
//! redirect and returns the rendered page.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use jotter_server::server::create_router;
use jotter_server::Database;

fn test_app() -> (Router, NamedTempFile) {
    let db_file = NamedTempFile::new().expect("temp database file");
    let db = Database::open(db_file.path()).expect("open database");
    (create_router(db, 30), db_file)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Post a form and follow the redirect, returning the final page body.
async fn post_form_following(app: &Router, uri: &str, fields: &[(&str, &str)]) -> String {
    let response = post_form(app, uri, fields).await;
    assert!(
        response.status().is_redirection(),
        "expected redirect from {uri}, got {}",
        response.status()
    );

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect location")
        .to_string();

    let (status, body) = get(app, &location).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn add_entry(app: &Router, title: &str, text: &str, category: &str) -> String {
    post_form_following(
        app,
        "/add",
        &[("title", title), ("text", text), ("category", category)],
    )
    .await
}

#[tokio::test]
async fn empty_db_shows_placeholder() {
    let (app, _db_file) = test_app();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No entries here so far"));
}

#[tokio::test]
async fn added_entry_escapes_title_but_not_text() {
    let (app, _db_file) = test_app();

    let body = add_entry(
        &app,
        "<Hello>",
        "<strong>HTML</strong> allowed here",
        "A category",
    )
    .await;

    assert!(!body.contains("No entries here so far"));
    assert!(body.contains("&lt;Hello&gt;"));
    assert!(body.contains("<strong>HTML</strong> allowed here"));
    assert!(body.contains("A category"));
}

#[tokio::test]
async fn multiple_entries_are_all_listed() {
    let (app, _db_file) = test_app();

    add_entry(&app, "First Entry", "First Text", "Category1").await;
    let body = add_entry(&app, "Second Entry", "Second Text", "Category2").await;

    assert!(body.contains("First Entry"));
    assert!(body.contains("Second Entry"));
}

#[tokio::test]
async fn delete_removes_entry_from_list() {
    let (app, _db_file) = test_app();

    add_entry(&app, "To Be Deleted", "Delete Me", "Test").await;

    let (_, body) = get(&app, "/").await;
    assert!(body.contains("To Be Deleted"));

    let body = post_form_following(&app, "/delete", &[("id", "1")]).await;
    assert!(!body.contains("To Be Deleted"));
}

#[tokio::test]
async fn delete_of_unknown_id_is_a_noop() {
    let (app, _db_file) = test_app();

    add_entry(&app, "Still Here", "text", "Test").await;

    let body = post_form_following(&app, "/delete", &[("id", "999")]).await;
    assert!(body.contains("Still Here"));
}

#[tokio::test]
async fn update_page_prefills_current_values() {
    let (app, _db_file) = test_app();

    add_entry(&app, "Original Title", "Original Text", "Original Category").await;

    let response = post_form(&app, "/update", &[("id", "1")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Original Title"));
    assert!(body.contains("Original Text"));
    assert!(body.contains("Original Category"));
}

#[tokio::test]
async fn update_page_for_unknown_id_is_404() {
    let (app, _db_file) = test_app();

    let response = post_form(&app, "/update", &[("id", "5")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_update_replaces_all_fields() {
    let (app, _db_file) = test_app();

    add_entry(&app, "Original Title", "Original Text", "Original Category").await;

    let body = post_form_following(
        &app,
        "/submit_update",
        &[
            ("id", "1"),
            ("title", "Updated Title"),
            ("text", "Updated Text"),
            ("category", "Updated Category"),
        ],
    )
    .await;

    assert!(body.contains("New entry was successfully updated"));
    assert!(body.contains("Updated Title"));
    assert!(body.contains("Updated Text"));
    assert!(!body.contains("Original Title"));
}

#[tokio::test]
async fn all_categories_are_displayed() {
    let (app, _db_file) = test_app();

    add_entry(&app, "Entry 1", "Text 1", "Category A").await;
    add_entry(&app, "Entry 2", "Text 2", "Category B").await;

    let (_, body) = get(&app, "/").await;
    assert!(body.contains("Category A"));
    assert!(body.contains("Category B"));
}

#[tokio::test]
async fn filter_shows_only_matching_category() {
    let (app, _db_file) = test_app();

    add_entry(&app, "Entry 1", "Text 1", "Category A").await;
    add_entry(&app, "Entry 2", "Text 2", "Category B").await;

    let (status, body) = get(&app, "/?sort_selected=Category%20A").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Entry 1"));
    assert!(!body.contains("Entry 2"));
}

#[tokio::test]
async fn entries_are_ordered_newest_first() {
    let (app, _db_file) = test_app();

    add_entry(&app, "First Entry", "Text 1", "Test").await;
    let body = add_entry(&app, "Second Entry", "Text 2", "Test").await;

    let second = body.find("Second Entry").expect("second entry rendered");
    let first = body.find("First Entry").expect("first entry rendered");
    assert!(second < first);
}

#[tokio::test]
async fn added_values_round_trip() {
    let (app, _db_file) = test_app();

    let body = add_entry(&app, "Plain title", "Plain text body", "Notes").await;

    assert!(body.contains("Plain title"));
    assert!(body.contains("Plain text body"));
    assert!(body.contains("Notes"));
    assert!(body.contains("New entry was successfully posted"));
}
