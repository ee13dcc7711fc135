use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A normalized page request: `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  page: i64,
  limit: i64,
}

impl PageRequest {
  pub fn new(page: i64, limit: i64) -> Self {
    Self {
      page: page.max(1),
      limit: limit.clamp(1, MAX_LIMIT),
    }
  }

  pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
    Self::new(
      parse_or(page, DEFAULT_PAGE),
      parse_or(limit, DEFAULT_LIMIT),
    )
  }

  /// Builds a request from decoded `?key=value` pairs. When a key repeats,
  /// its first value is used; unknown keys are ignored.
  pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
    let first = |key: &str| {
      pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
    };
    Self::from_params(first("page"), first("limit"))
  }

  pub fn page(&self) -> i64 {
    self.page
  }

  pub fn limit(&self) -> i64 {
    self.limit
  }

  /// Zero-based number of rows to skip.
  pub fn offset(&self) -> i64 {
    (self.page - 1).saturating_mul(self.limit)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
  }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
  raw
    .and_then(|value| value.trim().parse::<i64>().ok())
    .unwrap_or(default)
}

/// Number of pages needed to show `total` rows, `limit` at a time.
pub fn total_pages(total: i64, limit: i64) -> i64 {
  if total <= 0 || limit <= 0 {
    return 0;
  }
  (total + limit - 1) / limit
}
