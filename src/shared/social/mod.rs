//! Social Module
//!
//! Data structures for the friend graph and message notifications:
//!
//! - `User` - An account with its profile and friend set
//! - `FriendRequest` - A directed proposal to become friends
//! - `MessageNotification` - An unread-message marker for a recipient
//!
//! Record types are generic over how related users are represented, so the
//! same struct serves both the stored shape (ids) and the projected shape
//! (profile summaries) returned to clients.
//!
//! # Usage
//!
//! ```rust
//! use chatmates::shared::social::{FriendRequest, FriendRequestStatus};
//! ```

pub mod user;
pub mod friend_request;
pub mod notification;

pub use user::{FriendProfile, NewUser, OnboardingProfile, User, UserBadge};
pub use friend_request::{
    AcceptedFriendRequest, FriendRequest, FriendRequestStatus, FriendRequestsResponse,
    IncomingFriendRequest, OutgoingFriendRequest,
};
pub use notification::{
    CreateMessageNotificationRequest, MessageNotification, NewMessageNotification,
    NotificationWithSender, UnreadCountResponse,
};

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body (`{ "message": ... }`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
