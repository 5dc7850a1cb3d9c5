//! Integration tests for the book endpoints.

mod helpers;

use http::StatusCode;
use serial_test::serial;

fn sample_book() -> serde_json::Value {
    serde_json::json!({
        "title": "The Rust Programming Language",
        "author": "Steve Klabnik",
        "publisher": "No Starch Press",
        "published_date": "2019-08-12",
        "page_count": 560,
        "language": "English",
    })
}

#[tokio::test]
#[serial]
async fn test_create_and_get_book() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("author@example.com", "password123", "user")
        .await;
    let token = app.login("author@example.com", "password123").await;

    let response = app
        .request("POST", "/api/books", Some(sample_book()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let book_id = response.body.get("id").unwrap().as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/books/{book_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("title").unwrap().as_str().unwrap(),
        "The Rust Programming Language"
    );
    assert!(response.body.get("reviews").unwrap().is_array());
    assert!(response.body.get("tags").unwrap().is_array());
}

#[tokio::test]
#[serial]
async fn test_create_book_requires_auth() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/books", Some(sample_book()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_list_books_newest_first() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lister@example.com", "password123", "user")
        .await;
    let token = app.login("lister@example.com", "password123").await;

    app.request("POST", "/api/books", Some(sample_book()), Some(&token))
        .await;
    let mut second = sample_book();
    second["title"] = serde_json::json!("Programming Rust");
    app.request("POST", "/api/books", Some(second), Some(&token))
        .await;

    let response = app.request("GET", "/api/books", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body.get("items").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("title").unwrap().as_str().unwrap(), "Programming Rust");
    assert_eq!(response.body.get("total_items").unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_user_books_listing() {
    let app = helpers::TestApp::new().await;
    let owner_id = app
        .create_test_user("owner@example.com", "password123", "user")
        .await;
    app.create_test_user("browser@example.com", "password123", "user")
        .await;

    let owner_token = app.login("owner@example.com", "password123").await;
    app.request("POST", "/api/books", Some(sample_book()), Some(&owner_token))
        .await;

    let browser_token = app.login("browser@example.com", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/books/user/{owner_id}"),
            None,
            Some(&browser_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_update_book() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("editor@example.com", "password123", "user")
        .await;
    let token = app.login("editor@example.com", "password123").await;

    let created = app
        .request("POST", "/api/books", Some(sample_book()), Some(&token))
        .await;
    let book_id = created.body.get("id").unwrap().as_str().unwrap().to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/books/{book_id}"),
            Some(serde_json::json!({ "page_count": 600 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("page_count").unwrap(), 600);
    // Untouched fields survive a partial update.
    assert_eq!(
        response.body.get("title").unwrap().as_str().unwrap(),
        "The Rust Programming Language"
    );
}

#[tokio::test]
#[serial]
async fn test_delete_book_then_404() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("deleter@example.com", "password123", "user")
        .await;
    let token = app.login("deleter@example.com", "password123").await;

    let created = app
        .request("POST", "/api/books", Some(sample_book()), Some(&token))
        .await;
    let book_id = created.body.get("id").unwrap().as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/books/{book_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/books/{book_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_unknown_book_is_404() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("seeker@example.com", "password123", "user")
        .await;
    let token = app.login("seeker@example.com", "password123").await;

    let response = app
        .request(
            "GET",
            "/api/books/00000000-0000-0000-0000-000000000000",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
