//! Domain services.
//!
//! Handlers stay thin; authorization, quota checks, and store orchestration
//! live here. Every service holds trait objects only, so the same code runs
//! against AWS backends in production and in-memory backends in tests.

pub mod authz;
pub mod cascade;
pub mod files;
pub mod identity;
pub mod projects;
pub mod workspaces;

pub use cascade::{CascadeDeleter, CascadeReport};
pub use files::FileService;
pub use identity::IdentityService;
pub use projects::ProjectService;
pub use workspaces::WorkspaceService;
