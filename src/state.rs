use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::user::{
  model::{CreateUserRequest, User, UsersPage},
  pagination::PageRequest,
  repository::{SqlxUserRepository, UserRepository},
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn list_users(
    &self,
    page: PageRequest,
  ) -> impl std::future::Future<Output = Result<UsersPage, UserServiceError>> + Send;
  fn get_user_by_id(&self, user_id: i32) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn delete_user(&self, user_id: i32) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
  fn check_database(&self) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
}

/// Request-independent context shared by every handler. Owns the one store
/// handle created at startup.
pub struct SharedAppState<U = SqlxUserRepository> {
  pub user_service: Arc<UserServiceImpl<U>>,
}

impl<U> Clone for SharedAppState<U> {
  fn clone(&self) -> Self {
    Self {
      user_service: Arc::clone(&self.user_service),
    }
  }
}

impl SharedAppState {
  pub async fn new(pool: PgPool) -> Self {
    Self::with_repository(SqlxUserRepository::new(pool))
  }
}

impl<U: UserRepository> SharedAppState<U> {
  pub fn with_repository(user_repository: U) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(user_repository));

    Self { user_service }
  }
}

impl<U: UserRepository + 'static> AppState for SharedAppState<U> {
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn list_users(&self, page: PageRequest) -> Result<UsersPage, UserServiceError> {
    self.user_service.list_users(page).await
  }

  async fn get_user_by_id(&self, user_id: i32) -> Result<User, UserServiceError> {
    self.user_service.get_user_by_id(user_id).await
  }

  async fn delete_user(&self, user_id: i32) -> Result<(), UserServiceError> {
    self.user_service.delete_user(user_id).await
  }

  async fn check_database(&self) -> Result<(), UserServiceError> {
    self.user_service.check_database().await
  }
}
