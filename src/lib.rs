pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod domains;
pub mod presentation;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use utils::error::AppError;
