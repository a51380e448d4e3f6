//! Document-store backends.
//!
//! Defines the [`DocumentStore`] trait over user, workspace, and project
//! records, with a DynamoDB backend (production) and an in-memory backend
//! (tests, local development). The store offers single-item atomicity only —
//! there are no cross-item transactions, and the quota checks built on top of
//! it are documented read-then-write guarantees, not serializable ones.

mod dynamo;
mod memory;
mod traits;

pub mod factory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;
pub use traits::{DocumentError, DocumentResult, DocumentStore};
