//! Service context - dependency container for services
//!
//! Holds the graph store, the clock that stamps every write, and the retry
//! policy handed to callers.

use std::sync::Arc;

use social_common::AppConfig;
use social_core::traits::{GraphStore, GraphTransaction};
use social_core::{Clock, SystemClock};
use social_db::{bootstrap_schema, create_pool, DatabaseConfig, MemoryGraphStore, PgGraphStore};
use tracing::info;

use super::error::{ServiceError, ServiceResult};
use super::retry::RetryPolicy;

/// Service context containing all dependencies
///
/// Cheap to clone; clones share the same store and clock.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn GraphStore>,
    clock: Arc<dyn Clock>,
    retry_policy: RetryPolicy,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn GraphStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// In-memory store with wall-clock time
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryGraphStore::new()), Arc::new(SystemClock))
    }

    /// Build the context described by `config`
    ///
    /// With a database section the PostgreSQL store is used and its schema is
    /// created if missing; without one the graph lives in memory.
    pub async fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let worker_id = config.snowflake.worker_id;

        let store: Arc<dyn GraphStore> = match &config.database {
            Some(database) => {
                let pool = create_pool(&DatabaseConfig::from(database))
                    .await
                    .map_err(|e| ServiceError::internal(format!("database connection failed: {e}")))?;
                bootstrap_schema(&pool)
                    .await
                    .map_err(|e| ServiceError::internal(format!("schema bootstrap failed: {e}")))?;
                info!(worker_id, "Using PostgreSQL graph store");
                Arc::new(PgGraphStore::new(pool, worker_id))
            }
            None => {
                info!(worker_id, "Using in-memory graph store");
                Arc::new(MemoryGraphStore::with_worker_id(worker_id))
            }
        };

        Ok(Self::new(store, Arc::new(SystemClock)).with_retry_policy(RetryPolicy::from(&config.retry)))
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    // === Store ===

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    /// Open a transaction on the store
    pub async fn begin(&self) -> ServiceResult<Box<dyn GraphTransaction>> {
        Ok(self.store.begin().await?)
    }

    // === Time ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn GraphStore")
            .field("clock", &"dyn Clock")
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn GraphStore>>,
    clock: Option<Arc<dyn Clock>>,
    retry_policy: Option<RetryPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn GraphStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to [`SystemClock`] and the retry policy to
    /// [`RetryPolicy::default`].
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if no store was provided
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let store = self
            .store
            .ok_or_else(|| ServiceError::validation("store is required"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServiceContext::new(store, clock).with_retry_policy(self.retry_policy.unwrap_or_default()))
    }
}
