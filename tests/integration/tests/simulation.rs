//! Randomized workload against the in-memory store
//!
//! Many tasks fire friend requests, answers, unfriends and reactions at a
//! small population; whatever interleaving happens, the graph invariants
//! must hold afterwards.

use integration_tests::{assert_graph_invariants, memory_service, post_request, sign_up_users};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use social_core::{ReactionType, RequestDecision, Snowflake};
use social_service::GraphConsistencyService;

const USERS: usize = 6;
const TASKS: u64 = 8;
const STEPS: usize = 40;

async fn random_walk(
    service: GraphConsistencyService,
    users: Vec<Snowflake>,
    posts: Vec<Snowflake>,
    seed: u64,
) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..STEPS {
        let a = users[rng.gen_range(0..users.len())];
        let b = users[rng.gen_range(0..users.len())];

        // Domain errors are expected outcomes here; only the final state matters
        match rng.gen_range(0..4) {
            0 => {
                let _ = service.send_friend_request(a, b).await;
            }
            1 => {
                if let Ok(pending) = service.list_friend_requests(b).await {
                    if let Some(request) = pending.first() {
                        let decision = if rng.gen_bool(0.7) {
                            RequestDecision::Accept
                        } else {
                            RequestDecision::Reject
                        };
                        let _ = service.respond_to_request(request.id, decision).await;
                    }
                }
            }
            2 => {
                let _ = service.unfriend(a, b).await;
            }
            _ => {
                let post = posts[rng.gen_range(0..posts.len())];
                let kind = ReactionType::ALL[rng.gen_range(0..ReactionType::ALL.len())];
                let _ = service.react(post, a, kind.as_str()).await;
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_invariants_hold_under_concurrent_random_workload() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, USERS).await.unwrap();
    let mut posts = Vec::new();
    for &author in &users[..3] {
        posts.push(service.create_post(author, post_request()).await.unwrap().id);
    }

    let handles: Vec<_> = (0..TASKS)
        .map(|seed| {
            tokio::spawn(random_walk(
                service.clone(),
                users.clone(),
                posts.clone(),
                seed,
            ))
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = store.snapshot().await;
    assert_graph_invariants(&snapshot);
    assert!(snapshot.reactions.len() <= posts.len() * USERS);
}
