//! Typed HTTP client for the `/api/v1` user endpoints.

mod error;
mod users;

pub use error::{ClientError, Result};
pub use users::{UserApi, UserApiClient, DEFAULT_BASE_URL};
