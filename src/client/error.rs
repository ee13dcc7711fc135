//! Error types for the user API client.

use thiserror::Error;

use crate::domains::user::model::FieldError;

/// Errors that can occur when talking to the user API.
#[derive(Error, Debug)]
pub enum ClientError {
  /// HTTP request failed
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// Server is offline or unreachable
  #[error("Server unreachable: {0}")]
  ServerUnreachable(String),

  /// Invalid base URL
  #[error("Invalid API URL: {0}")]
  InvalidUrl(String),

  /// The server rejected the submitted fields
  #[error("{}", describe_fields(.0))]
  Validation(Vec<FieldError>),

  /// No record with the requested id
  #[error("User not found")]
  NotFound,

  /// Any other non-2xx response
  #[error("Server error ({status}): {message}")]
  ServerError { status: u16, message: String },

  /// Failed to parse server response
  #[error("Failed to parse response: {0}")]
  ParseError(String),
}

fn describe_fields(errors: &[FieldError]) -> String {
  let parts: Vec<String> = errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
  format!("Invalid input ({})", parts.join("; "))
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
