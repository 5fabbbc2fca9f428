//! Order persistence.
//!
//! The store is a collaborator behind [`OrderStore`]: PostgreSQL in real
//! deployments, an in-memory map when no database is configured and in
//! tests. Submission is at-most-once; callers never retry a failed create.

pub mod error;
pub mod memory;
pub mod pg;
pub mod store;

// Re-exports for convenience
pub use error::OrderStoreError;
pub use memory::MemoryOrderStore;
pub use pg::PgOrderStore;
pub use store::{CreateOrderResult, OrderStore, PersistedOrder};
