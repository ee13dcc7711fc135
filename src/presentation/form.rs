use crate::domains::user::model::{CreateUserRequest, FieldError};

/// Input state of the create form. Cleared after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserForm {
  pub name: String,
  pub email: String,
}

impl CreateUserForm {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
    }
  }

  pub fn to_request(&self) -> CreateUserRequest {
    CreateUserRequest {
      name: self.name.trim().to_string(),
      email: self.email.trim().to_string(),
    }
  }

  pub fn clear(&mut self) {
    self.name.clear();
    self.email.clear();
  }

  pub fn render(&self, errors: &[FieldError]) -> String {
    let mut out = String::from("Create New User\n");
    out.push_str(&format!("  Name:  {}\n", self.name));
    out.push_str(&render_field_errors(errors, "name"));
    out.push_str(&format!("  Email: {}\n", self.email));
    out.push_str(&render_field_errors(errors, "email"));
    out
  }
}

/// Lines for the errors attached to `field`, indented under its input.
fn render_field_errors(errors: &[FieldError], field: &str) -> String {
  errors
    .iter()
    .filter(|e| e.field == field)
    .map(|e| format!("    ! {}\n", e.message))
    .collect()
}
