//! End-to-end scenarios on the in-memory store
//!
//! Run with: cargo test -p integration-tests --test graph_scenarios

use integration_tests::{
    assert_graph_invariants, memory_service, post_request, sign_up_users,
};
use social_core::{FriendRequestStatus, ReactionType, RequestDecision};
use social_service::retry_on_conflict;

// ============================================================================
// Friend Requests
// ============================================================================

#[tokio::test]
async fn test_request_then_reverse_request() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, 2).await.unwrap();
    let (one, two) = (users[0], users[1]);

    let request = service.send_friend_request(one, two).await.unwrap();
    assert_eq!(request.sender_id, one);
    assert_eq!(request.receiver_id, two);
    assert_eq!(request.status, FriendRequestStatus::Pending);

    let err = service.send_friend_request(two, one).await.unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_PENDING");

    assert_graph_invariants(&store.snapshot().await);
}

#[tokio::test]
async fn test_accept_request_between_five_and_three() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, 2).await.unwrap();
    let (three, five) = (users[0], users[1]);

    let request = service.send_friend_request(five, three).await.unwrap();
    let resolution = service
        .respond_to_request(request.id, RequestDecision::Accept)
        .await
        .unwrap();

    let friendship = resolution.friendship.unwrap();
    assert_eq!((friendship.user_id_1, friendship.user_id_2), (three, five));
    for id in [three, five] {
        let user = service.get_user(id).await.unwrap();
        assert_eq!((user.num_followers, user.num_followings), (1, 1));
    }

    let err = service
        .respond_to_request(request.id, RequestDecision::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_RESOLVED");

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.friendships.len(), 1);
    assert_graph_invariants(&snapshot);
}

#[tokio::test]
async fn test_friend_lifecycle_round_trip() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, 3).await.unwrap();

    for &other in &users[1..] {
        let request = service.send_friend_request(other, users[0]).await.unwrap();
        service
            .respond_to_request(request.id, RequestDecision::Accept)
            .await
            .unwrap();
    }
    assert_eq!(service.list_friends(users[0]).await.unwrap(), users[1..].to_vec());
    assert_eq!(service.get_user(users[0]).await.unwrap().num_followers, 2);

    service.unfriend(users[0], users[2]).await.unwrap();
    assert_eq!(service.list_friends(users[0]).await.unwrap(), vec![users[1]]);

    let again = service.send_friend_request(users[0], users[2]).await.unwrap();
    let rejected = service
        .respond_to_request(again.id, RequestDecision::Reject)
        .await
        .unwrap();
    assert_eq!(rejected.request.status, FriendRequestStatus::Rejected);
    assert!(service.list_friend_requests(users[2]).await.unwrap().is_empty());

    assert_graph_invariants(&store.snapshot().await);
}

// ============================================================================
// Reactions and Shares
// ============================================================================

#[tokio::test]
async fn test_reaction_overwrite() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, 2).await.unwrap();
    let post = service.create_post(users[0], post_request()).await.unwrap();

    service.react(post.id, users[1], "love").await.unwrap();
    service.react(post.id, users[1], "sad").await.unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.reactions.len(), 1);
    assert_eq!(
        snapshot.reactions[&(post.id, users[1])].reaction_type,
        ReactionType::Sad
    );

    let counts = service.reaction_counts(post.id).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 1);
}

#[tokio::test]
async fn test_group_shares_accumulate() {
    let (service, _) = memory_service();
    let users = sign_up_users(&service, 2).await.unwrap();
    let group = service
        .create_group(integration_tests::group_request())
        .await
        .unwrap();
    let post = service.create_post(users[0], post_request()).await.unwrap();

    for _ in 0..3 {
        service
            .share_to_group(group.id, post.id, Some(users[1]))
            .await
            .unwrap();
    }
    let shares = service.list_group_posts(group.id).await.unwrap();
    assert_eq!(shares.len(), 3);
    assert!(shares.iter().all(|s| s.shared_by == Some(users[1])));
}

// ============================================================================
// Conflicts
// ============================================================================

#[tokio::test]
async fn test_retry_absorbs_injected_conflicts() {
    let (service, store) = memory_service();
    let users = sign_up_users(&service, 2).await.unwrap();
    let request = service.send_friend_request(users[0], users[1]).await.unwrap();

    store.inject_conflicts(3);
    let resolution = retry_on_conflict(service.retry_policy(), || {
        service.respond_to_request(request.id, RequestDecision::Accept)
    })
    .await
    .unwrap();

    assert!(resolution.friendship.is_some());
    assert_graph_invariants(&store.snapshot().await);
}
