use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::error::{ClientError, Result};
use crate::domains::user::model::{CreateUserRequest, FieldError, User, UsersPage};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";

/// The operations the presentation layer needs from the API.
#[async_trait]
pub trait UserApi: Send + Sync {
  async fn fetch_users(&self, page: i64, limit: i64) -> Result<UsersPage>;
  async fn fetch_user(&self, user_id: i32) -> Result<User>;
  async fn create_user(&self, new_user: &CreateUserRequest) -> Result<User>;
  async fn delete_user(&self, user_id: i32) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  message: String,
  #[serde(default)]
  error: Option<String>,
  #[serde(default)]
  errors: Vec<FieldError>,
}

/// `reqwest`-backed [`UserApi`].
#[derive(Debug, Clone)]
pub struct UserApiClient {
  http: Client,
  base_url: String,
}

impl UserApiClient {
  /// Create a client for an API rooted at `base_url`
  /// (for example `http://localhost:3001/api/v1`).
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let base_url = base_url.into();
    let base_url = base_url.trim().trim_end_matches('/').to_string();

    if base_url.is_empty() {
      return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
      return Err(ClientError::InvalidUrl(
        "URL must start with http:// or https://".into(),
      ));
    }

    let http = Client::builder()
      .timeout(Duration::from_secs(30))
      .connect_timeout(Duration::from_secs(10))
      .user_agent(format!("user-cli/{}", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self { http, base_url })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }
}

fn transport_error(err: reqwest::Error) -> ClientError {
  if err.is_connect() || err.is_timeout() {
    ClientError::ServerUnreachable(err.to_string())
  } else {
    ClientError::Request(err)
  }
}

async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
  response
    .json()
    .await
    .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Turns a non-2xx response into the matching [`ClientError`].
async fn error_from_response(response: Response) -> ClientError {
  let status = response.status();
  let text = response.text().await.unwrap_or_default();
  let body = serde_json::from_str::<ApiErrorBody>(&text).ok();

  match (status, body) {
    (StatusCode::NOT_FOUND, _) => ClientError::NotFound,
    (StatusCode::BAD_REQUEST, Some(body)) if !body.errors.is_empty() => ClientError::Validation(body.errors),
    (status, Some(body)) => ClientError::ServerError {
      status: status.as_u16(),
      message: match body.error {
        Some(detail) => format!("{}: {}", body.message, detail),
        None => body.message,
      },
    },
    (status, None) => ClientError::ServerError {
      status: status.as_u16(),
      message: text,
    },
  }
}

#[async_trait]
impl UserApi for UserApiClient {
  async fn fetch_users(&self, page: i64, limit: i64) -> Result<UsersPage> {
    let url = self.url("/users");
    debug!(url = %url, page, limit, "Fetching users");

    let response = self
      .http
      .get(&url)
      .query(&[("page", page), ("limit", limit)])
      .send()
      .await
      .map_err(transport_error)?;

    if !response.status().is_success() {
      return Err(error_from_response(response).await);
    }

    let page: UsersPage = parse_json(response, "user list").await?;
    debug!(count = page.users.len(), total = page.total, "Fetched users");
    Ok(page)
  }

  async fn fetch_user(&self, user_id: i32) -> Result<User> {
    let url = self.url(&format!("/users/{}", user_id));
    debug!(url = %url, "Fetching user");

    let response = self.http.get(&url).send().await.map_err(transport_error)?;

    if !response.status().is_success() {
      return Err(error_from_response(response).await);
    }

    parse_json(response, "user").await
  }

  async fn create_user(&self, new_user: &CreateUserRequest) -> Result<User> {
    let url = self.url("/users");
    debug!(url = %url, email = %new_user.email, "Creating user");

    let response = self
      .http
      .post(&url)
      .json(new_user)
      .send()
      .await
      .map_err(transport_error)?;

    if !response.status().is_success() {
      return Err(error_from_response(response).await);
    }

    parse_json(response, "created user").await
  }

  async fn delete_user(&self, user_id: i32) -> Result<()> {
    let url = self.url(&format!("/users/{}", user_id));
    debug!(url = %url, "Deleting user");

    let response = self.http.delete(&url).send().await.map_err(transport_error)?;

    if !response.status().is_success() {
      return Err(error_from_response(response).await);
    }

    Ok(())
  }
}
