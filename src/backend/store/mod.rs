//! Entity Store
//!
//! The `SocialStore` trait is the only way services reach persisted users,
//! friend requests and message notifications. Two implementations exist:
//!
//! - **`postgres`** - sqlx/PostgreSQL; uniqueness is enforced by indexes and
//!   friend-request acceptance runs in a single transaction
//! - **`memory`** - in-process tables behind one `RwLock`; used when
//!   `DATABASE_URL` is unset and by the test suite
//!
//! Services never cache records: every read goes back to the store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::social::{
    AcceptedFriendRequest, FriendProfile, FriendRequest, IncomingFriendRequest,
    MessageNotification, NewMessageNotification, NewUser, NotificationWithSender,
    OnboardingProfile, OutgoingFriendRequest, User,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Store-level failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error (connection, query, decode)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint rejected the write
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    /// A record the operation depends on disappeared mid-operation
    #[error("{0} vanished during the operation")]
    Inconsistent(&'static str),
}

impl StoreError {
    /// Whether the failure looks like a lost or exhausted connection
    pub fn is_connection_lost(&self) -> bool {
        matches!(
            self,
            StoreError::Database(
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            )
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A user together with its password hash
///
/// Only the login path ever sees this; everything else works with `User`.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Outcome of an idempotent notification insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationInsert {
    /// A new record was written
    Created(MessageNotification),
    /// A record for the same (sender, recipient, message id) already existed
    Existing(MessageNotification),
}

impl NotificationInsert {
    pub fn into_inner(self) -> MessageNotification {
        match self {
            NotificationInsert::Created(n) | NotificationInsert::Existing(n) => n,
        }
    }
}

/// Persistence port for the social graph
#[async_trait]
pub trait SocialStore: Send + Sync {
    // -- users ---------------------------------------------------------------

    /// Insert a user; `Duplicate("email")` when the email is taken
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>>;

    /// Store the onboarding profile and set the onboarded flag
    async fn complete_onboarding(
        &self,
        id: Uuid,
        profile: &OnboardingProfile,
    ) -> StoreResult<Option<User>>;

    /// Onboarded users other than `user_id` and its friends
    async fn recommended_users(&self, user_id: Uuid) -> StoreResult<Vec<User>>;

    async fn friends_of(&self, user_id: Uuid) -> StoreResult<Vec<FriendProfile>>;

    // -- friend requests -----------------------------------------------------

    /// Any request between the unordered pair, whatever its status
    async fn find_friend_request_between(&self, a: Uuid, b: Uuid)
        -> StoreResult<Option<FriendRequest>>;

    /// Insert a pending request; `Duplicate("friend request")` when the pair already has one
    async fn insert_friend_request(&self, sender: Uuid, recipient: Uuid)
        -> StoreResult<FriendRequest>;

    async fn find_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>>;

    /// Mark the request accepted and link both users, atomically
    ///
    /// Returns `None` if the request does not exist.
    async fn accept_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>>;

    async fn incoming_friend_requests(&self, user_id: Uuid)
        -> StoreResult<Vec<IncomingFriendRequest>>;

    async fn accepted_friend_requests(&self, user_id: Uuid)
        -> StoreResult<Vec<AcceptedFriendRequest>>;

    async fn outgoing_friend_requests(&self, user_id: Uuid)
        -> StoreResult<Vec<OutgoingFriendRequest>>;

    async fn count_pending_requests(&self, user_id: Uuid) -> StoreResult<i64>;

    // -- message notifications -----------------------------------------------

    async fn find_notification(
        &self,
        sender: Uuid,
        recipient: Uuid,
        message_id: &str,
    ) -> StoreResult<Option<MessageNotification>>;

    /// Insert unless the (sender, recipient, message id) tuple already exists
    async fn insert_notification(
        &self,
        notification: NewMessageNotification,
    ) -> StoreResult<NotificationInsert>;

    async fn unread_notifications(&self, user_id: Uuid) -> StoreResult<Vec<NotificationWithSender>>;

    /// Flip every unread notification for `user_id`; returns how many changed
    async fn mark_notifications_read(&self, user_id: Uuid) -> StoreResult<u64>;

    async fn count_unread_notifications(&self, user_id: Uuid) -> StoreResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_loss_classification() {
        assert!(StoreError::Database(sqlx::Error::PoolTimedOut).is_connection_lost());
        assert!(StoreError::Database(sqlx::Error::PoolClosed).is_connection_lost());
        assert!(!StoreError::Database(sqlx::Error::RowNotFound).is_connection_lost());
        assert!(!StoreError::Duplicate("email").is_connection_lost());
        assert!(!StoreError::Inconsistent("user").is_connection_lost());
    }
}
