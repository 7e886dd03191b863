//! Friend Graph Service
//!
//! Recommendations, friend lists and the friend request lifecycle. Every
//! operation takes the acting user explicitly and re-reads the store.

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::{SocialStore, StoreError};
use crate::shared::social::{
    FriendProfile, FriendRequest, FriendRequestsResponse, OutgoingFriendRequest, User,
};

/// Onboarded users the caller is not yet friends with
pub async fn recommended_users(store: &dyn SocialStore, me: &User) -> BackendResult<Vec<User>> {
    let users = store.recommended_users(me.id).await?;
    tracing::debug!("{} recommendations for {}", users.len(), me.id);
    Ok(users)
}

pub async fn my_friends(store: &dyn SocialStore, me: &User) -> BackendResult<Vec<FriendProfile>> {
    Ok(store.friends_of(me.id).await?)
}

/// Create a pending request from `me` to `recipient_id`
///
/// # Errors
///
/// * `Validation` - Request to self
/// * `NotFound` - Recipient does not exist
/// * `Conflict` - Already friends, or a request exists between the pair in either direction
pub async fn send_friend_request(
    store: &dyn SocialStore,
    me: &User,
    recipient_id: Uuid,
) -> BackendResult<FriendRequest> {
    if recipient_id == me.id {
        return Err(BackendError::validation(
            "You can't send friend request to yourself",
        ));
    }

    let recipient = store
        .find_user(recipient_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Recipient not found"))?;

    if recipient.is_friends_with(me.id) || me.is_friends_with(recipient.id) {
        return Err(BackendError::conflict("You are already friends with this user"));
    }

    if store
        .find_friend_request_between(me.id, recipient.id)
        .await?
        .is_some()
    {
        return Err(BackendError::conflict(
            "A friend request already exists between you and this user",
        ));
    }

    match store.insert_friend_request(me.id, recipient.id).await {
        Ok(request) => {
            tracing::info!(
                "Friend request {} sent from {} to {}",
                request.id,
                me.id,
                recipient.id
            );
            Ok(request)
        }
        // Lost a race against a concurrent send for the same pair.
        Err(StoreError::Duplicate(_)) => Err(BackendError::conflict(
            "A friend request already exists between you and this user",
        )),
        Err(e) => Err(e.into()),
    }
}

/// Accept a request addressed to `me`
///
/// # Errors
///
/// * `NotFound` - No such request
/// * `Forbidden` - `me` is not the recipient; the request is left untouched
pub async fn accept_friend_request(
    store: &dyn SocialStore,
    me: &User,
    request_id: Uuid,
) -> BackendResult<FriendRequest> {
    let request = store
        .find_friend_request(request_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friend request not found"))?;

    if request.recipient != me.id {
        tracing::warn!(
            "User {} tried to accept request {} addressed to {}",
            me.id,
            request.id,
            request.recipient
        );
        return Err(BackendError::forbidden(
            "You are not authorized to accept this request",
        ));
    }

    let accepted = store
        .accept_friend_request(request.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friend request not found"))?;

    tracing::info!(
        "Friend request {} accepted; {} and {} are now friends",
        accepted.id,
        accepted.sender,
        accepted.recipient
    );
    Ok(accepted)
}

pub async fn friend_requests(
    store: &dyn SocialStore,
    me: &User,
) -> BackendResult<FriendRequestsResponse> {
    let incoming_reqs = store.incoming_friend_requests(me.id).await?;
    let accepted_reqs = store.accepted_friend_requests(me.id).await?;
    Ok(FriendRequestsResponse {
        incoming_reqs,
        accepted_reqs,
    })
}

pub async fn outgoing_friend_requests(
    store: &dyn SocialStore,
    me: &User,
) -> BackendResult<Vec<OutgoingFriendRequest>> {
    Ok(store.outgoing_friend_requests(me.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::MemoryStore;
    use crate::shared::social::{FriendRequestStatus, NewUser, OnboardingProfile};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    async fn onboarded(store: &MemoryStore, name: &str) -> User {
        let user = store
            .create_user(NewUser {
                full_name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "hash".to_string(),
                profile_pic: String::new(),
            })
            .await
            .unwrap();
        let profile = OnboardingProfile {
            full_name: name.to_string(),
            bio: "hi".to_string(),
            native_language: "english".to_string(),
            learning_language: "spanish".to_string(),
            location: "earth".to_string(),
        };
        store
            .complete_onboarding(user.id, &profile)
            .await
            .unwrap()
            .unwrap()
    }

    async fn reload(store: &MemoryStore, user: &User) -> User {
        store.find_user(user.id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_self_request_rejected() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;

        let err = send_friend_request(&store, &alice, alice.id).await.unwrap_err();
        assert_matches!(err, BackendError::Validation { .. });
        assert_eq!(store.friend_request_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_recipient() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;

        let err = send_friend_request(&store, &alice, Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err, BackendError::NotFound { message } if message == "Recipient not found");
    }

    #[tokio::test]
    async fn test_existing_request_blocks_both_directions() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;
        let bob = onboarded(&store, "Bob").await;

        let request = send_friend_request(&store, &alice, bob.id).await.unwrap();
        assert_eq!(request.status, FriendRequestStatus::Pending);

        let again = send_friend_request(&store, &alice, bob.id).await.unwrap_err();
        assert_matches!(again, BackendError::Conflict { .. });
        let reverse = send_friend_request(&store, &bob, alice.id).await.unwrap_err();
        assert_matches!(reverse, BackendError::Conflict { .. });
        assert_eq!(store.friend_request_count().await, 1);
    }

    #[tokio::test]
    async fn test_accept_by_non_recipient_forbidden() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;
        let bob = onboarded(&store, "Bob").await;
        let carol = onboarded(&store, "Carol").await;

        let request = send_friend_request(&store, &alice, bob.id).await.unwrap();

        for intruder in [&alice, &carol] {
            let err = accept_friend_request(&store, intruder, request.id).await.unwrap_err();
            assert_matches!(err, BackendError::Forbidden { .. });
        }
        let stored = store.find_friend_request(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, FriendRequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_accept_links_both_users() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;
        let bob = onboarded(&store, "Bob").await;

        let request = send_friend_request(&store, &alice, bob.id).await.unwrap();
        let accepted = accept_friend_request(&store, &bob, request.id).await.unwrap();
        assert_eq!(accepted.status, FriendRequestStatus::Accepted);

        // Accepting again is a no-op.
        accept_friend_request(&store, &bob, request.id).await.unwrap();

        let alice = reload(&store, &alice).await;
        let bob = reload(&store, &bob).await;
        assert_eq!(alice.friends, vec![bob.id]);
        assert_eq!(bob.friends, vec![alice.id]);

        let err = send_friend_request(&store, &alice, bob.id).await.unwrap_err();
        assert_matches!(err, BackendError::Conflict { message } if message == "You are already friends with this user");
    }

    #[tokio::test]
    async fn test_accept_missing_request() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;

        let err = accept_friend_request(&store, &alice, Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err, BackendError::NotFound { .. });
    }

    #[tokio::test]
    async fn test_recommendations_exclude_self_and_friends() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;
        let bob = onboarded(&store, "Bob").await;
        let carol = onboarded(&store, "Carol").await;
        store
            .create_user(NewUser {
                full_name: "Dave".to_string(),
                email: "dave@example.com".to_string(),
                password_hash: "hash".to_string(),
                profile_pic: String::new(),
            })
            .await
            .unwrap();

        let request = send_friend_request(&store, &alice, bob.id).await.unwrap();
        accept_friend_request(&store, &bob, request.id).await.unwrap();

        let alice = reload(&store, &alice).await;
        let ids: Vec<Uuid> = recommended_users(&store, &alice)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![carol.id]);

        let friends = my_friends(&store, &alice).await.unwrap();
        assert_eq!(friends, vec![bob.profile()]);
    }

    #[tokio::test]
    async fn test_request_listings() {
        let store = MemoryStore::new();
        let alice = onboarded(&store, "Alice").await;
        let bob = onboarded(&store, "Bob").await;
        let carol = onboarded(&store, "Carol").await;

        let to_bob = send_friend_request(&store, &alice, bob.id).await.unwrap();
        send_friend_request(&store, &alice, carol.id).await.unwrap();
        accept_friend_request(&store, &bob, to_bob.id).await.unwrap();

        let bob_view = friend_requests(&store, &bob).await.unwrap();
        assert!(bob_view.incoming_reqs.is_empty());

        let alice_view = friend_requests(&store, &alice).await.unwrap();
        assert_eq!(alice_view.accepted_reqs.len(), 1);
        assert_eq!(alice_view.accepted_reqs[0].recipient, bob.badge());

        let carol_view = friend_requests(&store, &carol).await.unwrap();
        assert_eq!(carol_view.incoming_reqs.len(), 1);
        assert_eq!(carol_view.incoming_reqs[0].sender, alice.profile());

        let outgoing = outgoing_friend_requests(&store, &alice).await.unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].recipient, carol.profile());
    }
}
