#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod model;
pub mod pagination;
pub mod repository;
pub mod rest;
pub mod service;
