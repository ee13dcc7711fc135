use axum::{
  extract::{rejection::JsonRejection, Json, Path, Query, State},
  http::StatusCode,
  response::Json as JsonResponse,
  routing::get,
  Router,
};

use super::{
  model::{CreateUserRequest, User, UsersPage},
  pagination::PageRequest,
  service::USER_NOT_FOUND,
};
use crate::{state::AppState, utils::parse_record_id, AppError};

pub fn user_routes<S: AppState>() -> Router<S> {
  Router::new()
    .route("/users", get(list_users_handler::<S>).post(create_user_handler::<S>))
    .route(
      "/users/{id}",
      get(get_user_handler::<S>).delete(delete_user_handler::<S>),
    )
}

pub async fn create_user_handler<S: AppState>(
  State(state): State<S>,
  payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<User>), AppError> {
  let Json(payload) = payload?;
  let user = state.create_user(payload).await?;
  Ok((StatusCode::CREATED, JsonResponse(user)))
}

pub async fn list_users_handler<S: AppState>(
  State(state): State<S>,
  Query(params): Query<Vec<(String, String)>>,
) -> Result<JsonResponse<UsersPage>, AppError> {
  let page = PageRequest::from_query_pairs(&params);
  state.list_users(page).await.map(JsonResponse).map_err(Into::into)
}

pub async fn get_user_handler<S: AppState>(
  State(state): State<S>,
  Path(id): Path<String>,
) -> Result<JsonResponse<User>, AppError> {
  let id = parse_record_id(&id).ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;
  state.get_user_by_id(id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn delete_user_handler<S: AppState>(
  State(state): State<S>,
  Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
  let id = parse_record_id(&id).ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;
  state.delete_user(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
