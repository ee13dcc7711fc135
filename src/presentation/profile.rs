use crate::domains::user::model::User;

pub fn render_profile(user: &User) -> String {
  format!(
    "User Profile\n  ID:      {}\n  Name:    {}\n  Email:   {}\n  Created: {}\n",
    user.id,
    user.name,
    user.email,
    user.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  #[test]
  fn profile_lists_every_field() {
    let user = User {
      id: 3,
      name: "Grace".to_string(),
      email: "grace@example.com".to_string(),
      created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
    };
    let out = render_profile(&user);
    assert!(out.contains("ID:      3"));
    assert!(out.contains("Name:    Grace"));
    assert!(out.contains("Email:   grace@example.com"));
    assert!(out.contains("2024-06-01 09:30:00 UTC"));
  }
}
