use crate::helpers::spawn_app;
use hyper::StatusCode;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get("/health_check").await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app().await;

    let first = app.get("/health_check").await;
    let second = app.get("/health_check").await;

    let first_id = first.headers().get("x-request-id").unwrap().clone();
    let second_id = second.headers().get("x-request-id").unwrap().clone();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let app = spawn_app().await;

    let response = app.get("/nothing/here").await;

    assert_eq!(StatusCode::NOT_FOUND, response.status());
}
