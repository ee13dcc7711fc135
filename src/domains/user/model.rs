use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use validator::{Validate, ValidationErrors};

use super::pagination::PageRequest;

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct User {
  pub id: i32,
  pub name: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
  #[serde(default)]
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,
  #[serde(default)]
  #[validate(email(message = "Invalid email address"))]
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsersPage {
  pub users: Vec<User>,
  pub total: i64,
  pub page: i64,
  pub limit: i64,
}

/// One rejected field of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
  pub field: String,
  pub code: String,
  pub message: String,
}

impl FieldError {
  pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
      .field_errors()
      .into_iter()
      .flat_map(|(field, errs)| {
        let field = field.to_string();
        errs.iter().map(move |err| FieldError {
          field: field.clone(),
          code: err.code.to_string(),
          message: err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string()),
        })
      })
      .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
  }
}

impl User {
  pub async fn create(db: &PgPool, name: &str, email: &str) -> Result<User, sqlx::Error> {
    Self::create_with_executor(db, name, email).await
  }

  pub async fn create_with_executor<'e, E>(executor: E, name: &str, email: &str) -> Result<User, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (name, email)
        VALUES ($1, $2)
        RETURNING id, name, email, created_at
      "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(executor)
    .await?;

    Ok(user)
  }

  pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(r#"SELECT id, name, email, created_at FROM users WHERE id = $1"#)
      .bind(id)
      .fetch_optional(executor)
      .await?;

    Ok(user)
  }

  pub async fn list_page<'e, E>(executor: E, page: PageRequest) -> Result<Vec<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let users = sqlx::query_as::<_, User>(
      r#"
        SELECT id, name, email, created_at
        FROM users
        ORDER BY id ASC
        LIMIT $1 OFFSET $2
      "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await?;

    Ok(users)
  }

  pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
      .fetch_one(executor)
      .await
  }

  /// Returns `true` when a row was removed.
  pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_request_accepts_name_and_email() {
    let req = CreateUserRequest {
      name: "Ada".to_string(),
      email: "ada@example.com".to_string(),
    };
    assert!(req.validate().is_ok());
  }

  #[test]
  fn create_request_reports_each_invalid_field() {
    let req = CreateUserRequest {
      name: String::new(),
      email: "not-an-email".to_string(),
    };
    let errors = req.validate().unwrap_err();
    let fields = FieldError::from_validation_errors(&errors);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].field, "email");
    assert_eq!(fields[0].message, "Invalid email address");
    assert_eq!(fields[1].field, "name");
    assert_eq!(fields[1].code, "length");
  }

  #[test]
  fn missing_fields_deserialize_as_empty() {
    let req: CreateUserRequest = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
    assert_eq!(req.email, "");
    assert!(req.validate().is_err());
  }

  #[test]
  fn user_serializes_created_at_as_rfc3339() {
    let user = User {
      id: 1,
      name: "Ada".to_string(),
      email: "ada@example.com".to_string(),
      created_at: DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z").unwrap().with_timezone(&Utc),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["created_at"], "2024-06-01T12:00:00Z");
    assert_eq!(json["id"], 1);
  }
}
