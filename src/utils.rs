pub mod error;

/// Parses a path segment as a record id. Anything that is not a positive
/// 32-bit integer cannot name a stored row.
pub fn parse_record_id(raw: &str) -> Option<i32> {
  raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}
