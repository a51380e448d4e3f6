//! Product limits shared by the hierarchy and file services.
//!
//! These are product rules, not deployment tunables, so they live here as
//! compile-time constants rather than in [`crate::Config`].

/// Maximum number of workspaces a single user may own.
pub const WORKSPACES_PER_USER: usize = 10;

/// Maximum number of projects per workspace.
pub const PROJECTS_PER_WORKSPACE: usize = 10;

/// Maximum number of files per project.
pub const FILES_PER_PROJECT: usize = 5;

/// Maximum size of a single uploaded file, in bytes (2 MiB).
pub const MAX_FILE_SIZE_BYTES: usize = 2 * 1024 * 1024;

/// `MAX_FILE_SIZE_BYTES` expressed in whole mebibytes, for error messages.
pub const MAX_FILE_SIZE_MB: usize = MAX_FILE_SIZE_BYTES / 1024 / 1024;

/// Lifetime of presigned download/upload URLs, in seconds.
pub const PRESIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;
