//! DataForge Common Library
//!
//! Shared code for the DataForge services including:
//! - Catalog records (datasets, metadata, authors, metrics)
//! - Database models and repository patterns
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use catalog::{Author, Dataset, Metadata, Metrics, PublicationType};
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
