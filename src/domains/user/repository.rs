use async_trait::async_trait;
use sqlx::PgPool;

use super::{model::User, pagination::PageRequest};

#[derive(Debug)]
pub enum RepositoryError {
  DatabaseError(sqlx::Error),
  Conflict(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RepositoryError::DatabaseError(err) => write!(f, "{}", err),
      RepositoryError::Conflict(msg) => write!(f, "{}", msg),
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    let unique_violation = err
      .as_database_error()
      .map(|db_err| db_err.is_unique_violation())
      .unwrap_or(false);

    if unique_violation {
      RepositoryError::Conflict(err.to_string())
    } else {
      RepositoryError::DatabaseError(err)
    }
  }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, name: &str, email: &str) -> Result<User, RepositoryError>;
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
  /// One page of users in ascending id order plus the total row count,
  /// read from the same snapshot.
  async fn list(&self, page: PageRequest) -> Result<(Vec<User>, i64), RepositoryError>;
  async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
  async fn ping(&self) -> Result<(), RepositoryError>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, name: &str, email: &str) -> Result<User, RepositoryError> {
    Ok(User::create(&self.pool, name, email).await?)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_id(&self.pool, id).await?)
  }

  async fn list(&self, page: PageRequest) -> Result<(Vec<User>, i64), RepositoryError> {
    let mut tx = self.pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
      .execute(&mut *tx)
      .await?;

    let users = User::list_page(&mut *tx, page).await?;
    let total = User::count(&mut *tx).await?;
    tx.commit().await?;

    Ok((users, total))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    Ok(User::delete(&self.pool, id).await?)
  }

  async fn ping(&self) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }
}
