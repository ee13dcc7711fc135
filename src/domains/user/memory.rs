use std::{
  collections::BTreeMap,
  sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::Utc;

use super::{
  model::User,
  pagination::PageRequest,
  repository::{RepositoryError, UserRepository},
};

/// Store double that mimics the `users` table: sequential ids that are never
/// reused and a unique email constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
  inner: Mutex<InMemoryTable>,
}

#[derive(Default)]
struct InMemoryTable {
  last_id: i32,
  rows: BTreeMap<i32, User>,
}

impl InMemoryUserRepository {
  fn table(&self) -> MutexGuard<'_, InMemoryTable> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, name: &str, email: &str) -> Result<User, RepositoryError> {
    let mut table = self.table();
    if table.rows.values().any(|u| u.email == email) {
      return Err(RepositoryError::Conflict(
        "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
      ));
    }
    table.last_id += 1;
    let user = User {
      id: table.last_id,
      name: name.to_string(),
      email: email.to_string(),
      created_at: Utc::now(),
    };
    table.rows.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
    Ok(self.table().rows.get(&id).cloned())
  }

  async fn list(&self, page: PageRequest) -> Result<(Vec<User>, i64), RepositoryError> {
    let table = self.table();
    let users = table
      .rows
      .values()
      .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
      .take(usize::try_from(page.limit()).unwrap_or(0))
      .cloned()
      .collect();
    let total = i64::try_from(table.rows.len()).unwrap_or(i64::MAX);
    Ok((users, total))
  }

  async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
    Ok(self.table().rows.remove(&id).is_some())
  }

  async fn ping(&self) -> Result<(), RepositoryError> {
    Ok(())
  }
}
