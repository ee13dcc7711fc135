use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceExt;

use crate::{
  app::create_app,
  domains::user::memory::InMemoryUserRepository,
  state::SharedAppState,
};

pub fn app_in_memory() -> Router {
  create_app(SharedAppState::with_repository(InMemoryUserRepository::default()))
}

pub async fn app_with_pool(pool: PgPool) -> Router {
  let state = SharedAppState::new(pool).await;
  create_app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body))
    .expect("build request");

  send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("DELETE")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}
