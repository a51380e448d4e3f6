//! HTTP API for the workspace service.
//!
//! Exposes registration/login, the workspace → project hierarchy, and
//! project file storage over JSON endpoints. Public so integration tests can
//! assemble the router against in-memory backends.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
