//! HTTP handlers, one module per route group.

pub mod auth;
pub mod files;
pub mod health;
pub mod projects;
pub mod workspaces;
