use axum::{extract::State, response::Json as JsonResponse, routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::{state::AppState, AppError};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusMessage {
  pub message: String,
}

pub fn health_routes<S: AppState>() -> Router<S> {
  Router::new()
    .route("/test", get(api_test_handler))
    .route("/db-test", get(db_test_handler::<S>))
}

pub async fn api_test_handler() -> JsonResponse<StatusMessage> {
  JsonResponse(StatusMessage {
    message: "API is working".to_string(),
  })
}

pub async fn db_test_handler<S: AppState>(State(state): State<S>) -> Result<JsonResponse<StatusMessage>, AppError> {
  state.check_database().await?;

  Ok(JsonResponse(StatusMessage {
    message: "Database connected successfully".to_string(),
  }))
}
