//! Workdeck core types
//!
//! Entities, request/response models, the unified error type, configuration,
//! limits, and blob-key derivation shared by every other crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod keys;
pub mod models;

pub use config::{Config, DocumentBackend, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
