use async_trait::async_trait;
use std::error::Error;
use validator::Validate;

use super::{
  model::{CreateUserRequest, FieldError, User, UsersPage},
  pagination::PageRequest,
  repository::{RepositoryError, UserRepository},
};

pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError(Vec<FieldError>),
  UserNotFound(String),
  InternalServerError { message: String, detail: String },
}

impl UserServiceError {
  fn store(message: &str, err: RepositoryError) -> Self {
    UserServiceError::InternalServerError {
      message: message.to_string(),
      detail: err.to_string(),
    }
  }
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError(errors) => {
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        write!(f, "Validation Error: invalid {}", fields.join(", "))
      }
      UserServiceError::UserNotFound(msg) => write!(f, "User Not Found: {}", msg),
      UserServiceError::InternalServerError { message, detail } => {
        write!(f, "Internal Server Error: {}: {}", message, detail)
      }
    }
  }
}

impl From<RepositoryError> for UserServiceError {
  fn from(err: RepositoryError) -> Self {
    UserServiceError::store("Database error", err)
  }
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError>;
  async fn list_users(&self, page: PageRequest) -> Result<UsersPage, UserServiceError>;
  async fn get_user_by_id(&self, user_id: i32) -> Result<User, UserServiceError>;
  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError>;
  async fn check_database(&self) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(FieldError::from_validation_errors(&e)))?;

    let user = self
      .user_repository
      .create(&req.name, &req.email)
      .await
      .map_err(|e| UserServiceError::store("Failed to create user", e))?;

    tracing::info!(user_id = user.id, "Created user");
    Ok(user)
  }

  async fn list_users(&self, page: PageRequest) -> Result<UsersPage, UserServiceError> {
    let (users, total) = self
      .user_repository
      .list(page)
      .await
      .map_err(|e| UserServiceError::store("Failed to list users", e))?;

    Ok(UsersPage {
      users,
      total,
      page: page.page(),
      limit: page.limit(),
    })
  }

  async fn get_user_by_id(&self, user_id: i32) -> Result<User, UserServiceError> {
    let user = self
      .user_repository
      .find_by_id(user_id)
      .await?
      .ok_or_else(|| UserServiceError::UserNotFound(USER_NOT_FOUND.to_string()))?;

    Ok(user)
  }

  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError> {
    let deleted = self
      .user_repository
      .delete(user_id)
      .await
      .map_err(|e| UserServiceError::store("Failed to delete user", e))?;

    if !deleted {
      return Err(UserServiceError::UserNotFound(USER_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id, "Deleted user");
    Ok(())
  }

  async fn check_database(&self) -> Result<(), UserServiceError> {
    self
      .user_repository
      .ping()
      .await
      .map_err(|e| UserServiceError::store("Database connection test failed", e))
  }
}
