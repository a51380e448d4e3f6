//! Blob storage backends.
//!
//! Defines the [`BlobStorage`] trait plus two implementations: S3 (production)
//! and an in-memory store (tests, local development). Keys are the tenancy
//! prefixed paths built by `workdeck_core::keys`; this crate performs no
//! authorization of its own — ownership checks happen in the service layer
//! before any call lands here.

mod memory;
mod s3;
mod traits;

pub mod factory;

pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{BlobStorage, ObjectInfo, ObjectPage, StorageError, StorageResult};

/// Which backend a `BlobStorage` implementation talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackendKind {
    S3,
    Memory,
}

impl std::fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendKind::S3 => write!(f, "s3"),
            StorageBackendKind::Memory => write!(f, "memory"),
        }
    }
}
