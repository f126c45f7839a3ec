use crate::helpers::{assert_is_redirect_to, spawn_app, spawn_app_with_store, BrokenWrites};
use articles::domain::ArticleId;
use hyper::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn empty_list_is_a_success() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/articles").await;

    // Assert
    assert_eq!(StatusCode::OK, response.status());
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("No articles yet."));
}

#[tokio::test]
async fn new_article_form_is_empty() {
    let app = spawn_app().await;

    let response = app.get("/articles/new").await;

    assert_eq!(StatusCode::OK, response.status());
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains(r#"<form action="/articles" method="post">"#));
    assert!(html_page.contains(r#"name="article[title]" value="""#));
    assert!(html_page.contains(r#"<textarea name="article[body]"></textarea>"#));
    assert!(app.articles.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_redirects_to_the_new_article() {
    // Arrange
    let app = spawn_app().await;
    let body = [
        ("article[title]", "T1"),
        ("article[body]", "B1"),
        ("article[name]", "N1"),
    ];

    // Act - Part 1 - Create
    let response = app.post_articles(&body).await;
    assert_is_redirect_to(&response, "/articles/1");

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_html("/articles/1").await;
    assert!(html_page.contains("<h1>T1</h1>"));
    assert!(html_page.contains("<div>B1</div>"));
    assert!(html_page.contains("by N1"));

    // Act - Part 3 - The list shows exactly that article
    let html_page = app.get_html("/articles").await;
    assert!(html_page.contains(r#"<a href="/articles/1">T1</a> by N1"#));

    let stored = app.articles.all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(app.articles.find(ArticleId::new(1)).await.unwrap(), stored[0]);
}

#[tokio::test]
async fn extra_parameters_are_ignored() {
    let app = spawn_app().await;
    let body = [
        ("article[title]", "Hello"),
        ("article[body]", "World"),
        ("article[name]", "Ann"),
        ("article[status]", "99"),
        ("article[id]", "42"),
        ("status", "99"),
    ];

    let response = app.post_articles(&body).await;
    assert_is_redirect_to(&response, "/articles/1");

    let article = app.articles.find(ArticleId::new(1)).await.unwrap();
    assert_eq!(article.title.as_deref(), Some("Hello"));
    assert_eq!(article.body.as_deref(), Some("World"));
    assert_eq!(article.name.as_deref(), Some("Ann"));
    assert_eq!(article.status, None);
}

#[tokio::test]
async fn resubmitting_creates_another_article() {
    let app = spawn_app().await;
    let body = [("article[title]", "Twice")];

    let first = app.post_articles(&body).await;
    let second = app.post_articles(&body).await;

    assert_is_redirect_to(&first, "/articles/1");
    assert_is_redirect_to(&second, "/articles/2");
    assert_eq!(app.articles.all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_without_article_scope_is_a_400() {
    let app = spawn_app().await;
    let test_cases = vec![
        (vec![("title", "Hello")], "unscoped fields"),
        (vec![], "empty form"),
    ];

    for (body, description) in test_cases {
        let response = app.post_articles(&body).await;

        assert_eq!(
            StatusCode::BAD_REQUEST,
            response.status(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
    }
    assert!(app.articles.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_a_json_body_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(app.url("/articles"))
        .header("Content-Type", "application/json")
        .body(r#"{"article": {"title": "Hello"}}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn missing_articles_are_not_found() {
    let app = spawn_app().await;
    app.post_articles(&[("article[title]", "only one")]).await;

    for path in ["/articles/0", "/articles/999", "/articles/9223372036854775807", "/articles/abc"] {
        let response = app.get(path).await;
        assert_eq!(StatusCode::NOT_FOUND, response.status(), "GET {}", path);

        let html_page = response.text().await.unwrap();
        assert!(html_page.contains("doesn't exist"));
    }
}

#[tokio::test]
async fn failed_create_rerenders_the_form_with_the_input() {
    // Arrange
    let app = spawn_app_with_store(Arc::new(BrokenWrites::new())).await;
    let body = [
        ("article[title]", "Hello"),
        ("article[body]", "World"),
        ("article[name]", "Ann"),
    ];

    // Act
    let response = app.post_articles(&body).await;

    // Assert
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains(r#"name="article[title]" value="Hello""#));
    assert!(html_page.contains(r#"<textarea name="article[body]">World</textarea>"#));
    assert!(html_page.contains(r#"name="article[name]" value="Ann""#));
    assert!(html_page.contains("Article could not be saved."));

    assert!(app.articles.all().await.unwrap().is_empty());
    let html_page = app.get_html("/articles").await;
    assert!(!html_page.contains("Hello"));
}
