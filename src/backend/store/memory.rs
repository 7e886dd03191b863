//! In-memory `SocialStore`
//!
//! All tables live behind a single `tokio::sync::RwLock`, so each trait call is
//! atomic: check-then-insert sequences and the accept transition cannot
//! interleave with other writers. Records keep insertion order.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NotificationInsert, SocialStore, StoreError, StoreResult, UserCredentials};
use crate::shared::social::{
    AcceptedFriendRequest, FriendProfile, FriendRequest, FriendRequestStatus,
    IncomingFriendRequest, MessageNotification, NewMessageNotification, NewUser,
    NotificationWithSender, OnboardingProfile, OutgoingFriendRequest, User,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredUser>,
    friend_requests: Vec<FriendRequest>,
    notifications: Vec<MessageNotification>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().map(|u| &u.user).find(|u| u.id == id)
    }

    fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().map(|u| &mut u.user).find(|u| u.id == id)
    }

    /// Add `friend` to `user_id`'s friend set if absent
    fn link(&mut self, user_id: Uuid, friend: Uuid) -> StoreResult<()> {
        let user = self.user_mut(user_id).ok_or(StoreError::Inconsistent("user"))?;
        if !user.friends.contains(&friend) {
            user.friends.push(friend);
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// `SocialStore` backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications, read or not
    pub async fn notification_count(&self) -> usize {
        self.tables.read().await.notifications.len()
    }

    /// Number of stored friend requests, any status
    pub async fn friend_request_count(&self) -> usize {
        self.tables.read().await.friend_requests.len()
    }
}

#[async_trait]
impl SocialStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.user.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(StoreError::Duplicate("email"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name: new_user.full_name,
            email: new_user.email,
            bio: String::new(),
            profile_pic: new_user.profile_pic,
            native_language: String::new(),
            learning_language: String::new(),
            location: String::new(),
            is_onboarded: false,
            friends: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.email.eq_ignore_ascii_case(email))
            .map(|u| UserCredentials {
                user: u.user.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn complete_onboarding(
        &self,
        id: Uuid,
        profile: &OnboardingProfile,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        user.full_name = profile.full_name.clone();
        user.bio = profile.bio.clone();
        user.native_language = profile.native_language.clone();
        user.learning_language = profile.learning_language.clone();
        user.location = profile.location.clone();
        user.is_onboarded = true;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn recommended_users(&self, user_id: Uuid) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let friends = tables
            .user(user_id)
            .map(|u| u.friends.clone())
            .unwrap_or_default();
        Ok(tables
            .users
            .iter()
            .map(|u| &u.user)
            .filter(|u| u.id != user_id && u.is_onboarded && !friends.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn friends_of(&self, user_id: Uuid) -> StoreResult<Vec<FriendProfile>> {
        let tables = self.tables.read().await;
        let Some(user) = tables.user(user_id) else {
            return Ok(Vec::new());
        };
        Ok(user
            .friends
            .iter()
            .filter_map(|id| tables.user(*id))
            .map(User::profile)
            .collect())
    }

    async fn find_friend_request_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> StoreResult<Option<FriendRequest>> {
        let tables = self.tables.read().await;
        Ok(tables.friend_requests.iter().find(|r| r.connects(a, b)).cloned())
    }

    async fn insert_friend_request(
        &self,
        sender: Uuid,
        recipient: Uuid,
    ) -> StoreResult<FriendRequest> {
        let mut tables = self.tables.write().await;
        if tables.friend_requests.iter().any(|r| r.connects(sender, recipient)) {
            return Err(StoreError::Duplicate("friend request"));
        }
        let request = FriendRequest::new(sender, recipient);
        tables.friend_requests.push(request.clone());
        Ok(request)
    }

    async fn find_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>> {
        let tables = self.tables.read().await;
        Ok(tables.friend_requests.iter().find(|r| r.id == id).cloned())
    }

    async fn accept_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>> {
        let mut tables = self.tables.write().await;
        let Some(request) = tables.friend_requests.iter().find(|r| r.id == id).cloned() else {
            return Ok(None);
        };
        // Validate both parties before mutating anything so a failure leaves no partial state.
        if tables.user(request.sender).is_none() || tables.user(request.recipient).is_none() {
            return Err(StoreError::Inconsistent("user"));
        }

        tables.link(request.sender, request.recipient)?;
        tables.link(request.recipient, request.sender)?;

        let stored = tables
            .friend_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::Inconsistent("friend request"))?;
        stored.status = FriendRequestStatus::Accepted;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn incoming_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<IncomingFriendRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.recipient == user_id && r.is_pending())
            .filter_map(|r| {
                let sender = tables.user(r.sender)?.profile();
                Some(r.clone().with_parties(sender, r.recipient))
            })
            .collect())
    }

    async fn accepted_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<AcceptedFriendRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.sender == user_id && r.status == FriendRequestStatus::Accepted)
            .filter_map(|r| {
                let recipient = tables.user(r.recipient)?.badge();
                Some(r.clone().with_parties(r.sender, recipient))
            })
            .collect())
    }

    async fn outgoing_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OutgoingFriendRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.sender == user_id && r.is_pending())
            .filter_map(|r| {
                let recipient = tables.user(r.recipient)?.profile();
                Some(r.clone().with_parties(r.sender, recipient))
            })
            .collect())
    }

    async fn count_pending_requests(&self, user_id: Uuid) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|r| r.recipient == user_id && r.is_pending())
            .count() as i64)
    }

    async fn find_notification(
        &self,
        sender: Uuid,
        recipient: Uuid,
        message_id: &str,
    ) -> StoreResult<Option<MessageNotification>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .find(|n| n.sender == sender && n.recipient == recipient && n.message_id == message_id)
            .cloned())
    }

    async fn insert_notification(
        &self,
        notification: NewMessageNotification,
    ) -> StoreResult<NotificationInsert> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.notifications.iter().find(|n| {
            n.sender == notification.sender
                && n.recipient == notification.recipient
                && n.message_id == notification.message_id
        }) {
            return Ok(NotificationInsert::Existing(existing.clone()));
        }
        let record = notification.into_record();
        tables.notifications.push(record.clone());
        Ok(NotificationInsert::Created(record))
    }

    async fn unread_notifications(&self, user_id: Uuid) -> StoreResult<Vec<NotificationWithSender>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.recipient == user_id && !n.is_read)
            .filter_map(|n| {
                let sender = tables.user(n.sender)?.badge();
                Some(n.clone().with_sender(sender))
            })
            .collect())
    }

    async fn mark_notifications_read(&self, user_id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut changed = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| n.recipient == user_id && !n.is_read)
        {
            notification.is_read = true;
            notification.updated_at = now;
            changed += 1;
        }
        Ok(changed)
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.recipient == user_id && !n.is_read)
            .count() as i64)
    }
}
