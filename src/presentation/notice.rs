use std::time::{Duration, Instant};

/// How long a success or error message stays visible.
const NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
  Success,
  Error,
}

/// A transient message. Expiry only hides it; nothing is retried.
#[derive(Debug, Clone)]
pub struct Notice {
  kind: NoticeKind,
  text: String,
  shown_at: Instant,
}

impl Notice {
  pub fn success(text: impl Into<String>, now: Instant) -> Self {
    Self {
      kind: NoticeKind::Success,
      text: text.into(),
      shown_at: now,
    }
  }

  pub fn error(text: impl Into<String>, now: Instant) -> Self {
    Self {
      kind: NoticeKind::Error,
      text: text.into(),
      shown_at: now,
    }
  }

  pub fn is_expired(&self, now: Instant) -> bool {
    now.saturating_duration_since(self.shown_at) >= NOTICE_DURATION
  }

  pub fn render(&self) -> String {
    match self.kind {
      NoticeKind::Success => format!("Success! {}", self.text),
      NoticeKind::Error => format!("Error! {}", self.text),
    }
  }
}
