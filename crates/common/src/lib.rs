//! Shared utilities, configuration, and error handling for the portfolio service
//!
//! This crate provides common functionality used across the domain crates:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors (validated JSON, pagination)
//! - The shared state machine error

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, LogFormat};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Page, Pagination, ValidatedJson};
pub use state::StateError;
