use std::fmt::Write;

use crate::domains::user::model::User;

/// State of the Previous / page-number / Next controls under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PaginationControls {
  current: i64,
  total_pages: i64,
  previous_enabled: bool,
  next_enabled: bool,
}

impl PaginationControls {
  fn new(current: i64, total_pages: i64) -> Self {
    let current = current.max(1);
    Self {
      current,
      total_pages,
      previous_enabled: current > 1,
      next_enabled: current < total_pages,
    }
  }

  fn render(&self) -> String {
    let mut out = String::new();
    out.push_str(if self.previous_enabled { "< Previous" } else { "  --------" });
    for page in 1..=self.total_pages {
      if page == self.current {
        let _ = write!(out, "  [{}]", page);
      } else {
        let _ = write!(out, "  {}", page);
      }
    }
    out.push_str(if self.next_enabled { "  Next >" } else { "  ------" });
    out
  }
}

const HEADERS: [&str; 4] = ["ID", "Name", "Email", "Created At"];

pub fn render_user_table(users: &[User], current_page: i64, total_pages: i64) -> String {
  let rows: Vec<[String; 4]> = users
    .iter()
    .map(|u| {
      [
        u.id.to_string(),
        u.name.clone(),
        u.email.clone(),
        u.created_at.format("%Y-%m-%d").to_string(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(|h| h.chars().count());
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row.iter()) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_row(&mut out, &HEADERS.map(str::to_string), &widths);
  let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
  let _ = writeln!(out, "{}", rule.join("-+-"));

  if rows.is_empty() {
    out.push_str("No users found.\n");
  }
  for row in &rows {
    push_row(&mut out, row, &widths);
  }

  out.push('\n');
  out.push_str(&PaginationControls::new(current_page, total_pages).render());
  out.push('\n');
  out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
  let padded: Vec<String> = cells
    .iter()
    .zip(widths.iter())
    .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
    .collect();
  let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}
