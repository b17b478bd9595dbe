//! Test helpers for integration tests
//!
//! Builds services over either store and checks the graph invariants
//! against a memory store snapshot.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use anyhow::Result;
use social_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use social_core::{Snowflake, UserPair, VirtualClock};
use social_db::{MemoryGraphStore, MemorySnapshot};
use social_service::{GraphConsistencyService, RetryPolicy, ServiceContext};

/// Snowflake worker IDs handed to PostgreSQL-backed services, so stores
/// created by concurrently running tests never mint the same ID
static WORKER_COUNTER: AtomicU16 = AtomicU16::new(1);

pub fn next_worker_id() -> u16 {
    WORKER_COUNTER.fetch_add(1, Ordering::SeqCst) % 1024
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if a PostgreSQL test database is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Service over a fresh memory store and a virtual clock
pub fn memory_service() -> (GraphConsistencyService, MemoryGraphStore) {
    // Another test in this binary may have installed the subscriber already
    let _ = try_init_tracing();

    let store = MemoryGraphStore::new();
    let ctx = ServiceContext::new(Arc::new(store.clone()), Arc::new(VirtualClock::default()))
        .with_retry_policy(fast_retry_policy());
    (GraphConsistencyService::new(ctx), store)
}

/// Service over the PostgreSQL database named by `DATABASE_URL`
pub async fn pg_service() -> Result<GraphConsistencyService> {
    let mut config = test_config()?;
    if config.database.is_none() {
        anyhow::bail!("DATABASE_URL not set");
    }
    config.snowflake.worker_id = next_worker_id();
    let _ = try_init_tracing_with_config(TracingConfig::from_logging(&config.logging));

    let ctx = ServiceContext::from_config(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Context error: {}", e))?;
    Ok(GraphConsistencyService::new(
        ctx.with_retry_policy(fast_retry_policy()),
    ))
}

pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 8,
        base_delay: std::time::Duration::from_millis(2),
        max_delay: std::time::Duration::from_millis(50),
    }
}

/// Check every consistency invariant of the graph against a snapshot
///
/// - at most one pending request per unordered pair
/// - friendships stored as `(min, max)`, one per pair
/// - each user's counters equal the number of friendships they take part in
/// - at most one reaction per (post, user)
pub fn assert_graph_invariants(snapshot: &MemorySnapshot) {
    let mut pending: BTreeMap<UserPair, usize> = BTreeMap::new();
    for request in snapshot.friend_requests.values() {
        if request.is_pending() {
            let pair = request.pair().expect("request between distinct users");
            *pending.entry(pair).or_default() += 1;
        }
    }
    for (pair, count) in &pending {
        assert_eq!(*count, 1, "{count} pending requests for {pair}");
    }

    for (pair, friendship) in &snapshot.friendships {
        assert!(friendship.user_id_1 < friendship.user_id_2);
        assert_eq!(friendship.user_id_1, pair.low());
        assert_eq!(friendship.user_id_2, pair.high());
    }

    for user in snapshot.users.values() {
        let degree = i32::try_from(snapshot.degree(user.id)).expect("degree fits i32");
        assert_eq!(user.num_followers, degree, "followers of {}", user.id);
        assert_eq!(user.num_followings, degree, "followings of {}", user.id);
    }

    let mut seen: BTreeMap<(Snowflake, Snowflake), usize> = BTreeMap::new();
    for reaction in snapshot.reactions.values() {
        *seen.entry((reaction.post_id, reaction.user_id)).or_default() += 1;
    }
    assert!(seen.values().all(|n| *n == 1));
}
