//! Graph store implementations
//!
//! Both stores implement the `GraphStore` / `GraphTransaction` ports from
//! social-core and must be observably equivalent to the service.

mod error;
mod memory;
mod postgres;

pub use memory::{MemoryGraphStore, MemorySnapshot};
pub use postgres::PgGraphStore;
