use std::net::SocketAddr;

use anyhow::{anyhow, Context};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub host: String,
  pub port: u16,
  pub database: DatabaseConfig,
}

impl AppConfig {
  /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up
  /// a local `.env` file.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let url = lookup("DATABASE_URL")
      .filter(|v| !v.trim().is_empty())
      .ok_or_else(|| anyhow!("DATABASE_URL environment variable must be set."))?;

    Ok(Self {
      host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
      port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
      database: DatabaseConfig {
        url,
        max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        acquire_timeout_secs: parse_var(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?,
      },
    })
  }

  pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", self.host, self.port)
      .parse()
      .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
  }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match lookup(key) {
    Some(raw) => raw
      .trim()
      .parse()
      .with_context(|| format!("{key} has an invalid value: {raw}")),
    None => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn test_defaults_apply_when_only_database_url_is_set() {
    let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/users")])).unwrap();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
    assert_eq!(config.bind_addr().unwrap().port(), 3001);
  }

  #[test]
  fn test_missing_database_url_is_an_error() {
    let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));
  }

  #[test]
  fn test_invalid_port_is_an_error() {
    let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]));
    assert!(result.is_err());
  }

  #[test]
  #[serial]
  fn test_from_env_reads_process_environment() {
    std::env::set_var("DATABASE_URL", "postgres://env-host/users");
    std::env::set_var("PORT", "8080");
    let config = AppConfig::from_env();
    std::env::remove_var("PORT");
    std::env::remove_var("DATABASE_URL");

    let config = config.unwrap();
    assert_eq!(config.database.url, "postgres://env-host/users");
    assert_eq!(config.port, 8080);
  }
}
