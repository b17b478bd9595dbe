//! # social-db
//!
//! Storage layer implementing the `social-core` store traits.
//!
//! ## Overview
//!
//! - [`PgGraphStore`]: PostgreSQL via SQLx, every transaction at
//!   `SERIALIZABLE` isolation
//! - [`MemoryGraphStore`]: in-process store with the same semantics, used by
//!   tests and simulations
//! - Database models with SQLx `FromRow` derives and model → entity mappers
//! - Connection pool management and schema bootstrap
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::{create_pool, DatabaseConfig, PgGraphStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "postgresql://localhost/social_graph".to_string(),
//!         ..DatabaseConfig::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     social_db::bootstrap_schema(&pool).await?;
//!     let store = PgGraphStore::new(pool, 0);
//!     // hand `store` to the graph service...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod store;

// Re-export commonly used types
pub use pool::{bootstrap_schema, create_pool, DatabaseConfig, PgPool};
pub use store::{MemoryGraphStore, MemorySnapshot, PgGraphStore};
