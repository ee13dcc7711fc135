use axum::{response::Html, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
  domains::{health::rest::health_routes, user::rest::user_routes},
  state::AppState,
};

pub fn create_app<S: AppState>(state: S) -> Router {
  Router::new()
    .route("/", get(hello_world_handler))
    .nest("/api/v1", user_routes::<S>().merge(health_routes::<S>()))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

pub async fn hello_world_handler() -> Html<String> {
  Html("<h1>User Directory API</h1>".to_string())
}
