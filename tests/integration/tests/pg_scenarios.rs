//! Scenarios against PostgreSQL
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test pg_scenarios

use integration_tests::{check_test_env, group_request, pg_service, post_request, sign_up_users};
use social_core::{FriendRequestStatus, ReactionType, RequestDecision};
use social_service::retry_on_conflict;

#[tokio::test]
async fn test_pg_friend_request_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let service = pg_service().await.expect("Failed to build service");
    let users = sign_up_users(&service, 2).await.unwrap();
    let (low, high) = (users[0], users[1]);

    let request = service.send_friend_request(high, low).await.unwrap();
    let err = service.send_friend_request(low, high).await.unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_PENDING");

    let resolution = service
        .respond_to_request(request.id, RequestDecision::Accept)
        .await
        .unwrap();
    assert_eq!(resolution.request.status, FriendRequestStatus::Accepted);
    let friendship = resolution.friendship.unwrap();
    assert_eq!((friendship.user_id_1, friendship.user_id_2), (low, high));

    let err = service
        .respond_to_request(request.id, RequestDecision::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_RESOLVED");

    for id in [low, high] {
        let user = service.get_user(id).await.unwrap();
        assert_eq!((user.num_followers, user.num_followings), (1, 1));
    }

    let err = service.send_friend_request(low, high).await.unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_FRIENDS");

    service.unfriend(high, low).await.unwrap();
    assert!(service.list_friends(low).await.unwrap().is_empty());
    assert_eq!(service.get_user(high).await.unwrap().num_followers, 0);
}

#[tokio::test]
async fn test_pg_concurrent_sends_only_one_wins() {
    if !check_test_env().await {
        return;
    }

    let service = pg_service().await.expect("Failed to build service");
    let users = sign_up_users(&service, 2).await.unwrap();
    let (a, b) = (users[0], users[1]);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let service = service.clone();
            let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
            tokio::spawn(async move {
                retry_on_conflict(service.retry_policy(), || {
                    service.send_friend_request(from, to)
                })
                .await
            })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e.error_code(), "DUPLICATE_PENDING"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(service.list_friend_requests(a).await.unwrap().len()
        + service.list_friend_requests(b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_pg_reaction_upsert_and_shares() {
    if !check_test_env().await {
        return;
    }

    let service = pg_service().await.expect("Failed to build service");
    let users = sign_up_users(&service, 2).await.unwrap();
    let post = service.create_post(users[0], post_request()).await.unwrap();

    let first = service.react(post.id, users[1], "love").await.unwrap();
    let second = service.react(post.id, users[1], "sad").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.reaction_type, ReactionType::Sad);

    let counts = service.reaction_counts(post.id).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].reaction_type, ReactionType::Sad);
    assert_eq!(counts[0].count, 1);

    let err = service.react(post.id, users[1], "meh").await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_REACTION_TYPE");

    let group = service.create_group(group_request()).await.unwrap();
    service.share_to_group(group.id, post.id, None).await.unwrap();
    service
        .share_to_group(group.id, post.id, Some(users[1]))
        .await
        .unwrap();
    assert_eq!(service.list_group_posts(group.id).await.unwrap().len(), 2);
}
