use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;

use crate::domains::user::{model::FieldError, service::UserServiceError};

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
  pub detail: Option<String>,
  pub field_errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
  message: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  errors: Option<&'a [FieldError]>,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
      detail: None,
      field_errors: Vec::new(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn validation(field_errors: Vec<FieldError>) -> Self {
    Self {
      field_errors,
      ..Self::bad_request("Validation failed")
    }
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }

  pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
    self.detail = Some(detail.into());
    self
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = ErrorBody {
      message: &self.message,
      error: self.detail.as_deref(),
      errors: (!self.field_errors.is_empty()).then_some(self.field_errors.as_slice()),
    };

    (self.status_code, Json(body)).into_response()
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    AppError::bad_request("Invalid JSON format").with_detail(rejection.body_text())
  }
}

impl From<UserServiceError> for AppError {
  fn from(error: UserServiceError) -> Self {
    match error {
      UserServiceError::ValidationError(errors) => AppError::validation(errors),
      UserServiceError::UserNotFound(msg) => AppError::not_found(msg),
      UserServiceError::InternalServerError { message, detail } => {
        tracing::error!("{}: {}", message, detail);
        AppError::internal_server_error(message).with_detail(detail)
      }
    }
  }
}
