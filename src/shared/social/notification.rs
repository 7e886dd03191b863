//! Message Notification Data Structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserBadge;

/// An unread-message marker for a recipient
///
/// `S` is the sender representation: an id when stored, a badge in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageNotification<S = Uuid> {
    pub id: Uuid,
    pub sender: S,
    pub recipient: Uuid,
    /// Message id assigned by the chat provider
    pub message_id: String,
    /// Channel id assigned by the chat provider
    pub channel_id: String,
    /// Snapshot of the message text at dispatch time
    pub message_text: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unread notification with the sender projected
pub type NotificationWithSender = MessageNotification<UserBadge>;

impl<S> MessageNotification<S> {
    /// Replace the sender representation
    pub fn with_sender<S2>(self, sender: S2) -> MessageNotification<S2> {
        MessageNotification {
            id: self.id,
            sender,
            recipient: self.recipient,
            message_id: self.message_id,
            channel_id: self.channel_id,
            message_text: self.message_text,
            is_read: self.is_read,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields needed to record a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessageNotification {
    pub sender: Uuid,
    pub recipient: Uuid,
    pub message_id: String,
    pub channel_id: String,
    pub message_text: String,
}

impl NewMessageNotification {
    /// Materialize as a fresh unread record
    pub fn into_record(self) -> MessageNotification {
        let now = Utc::now();
        MessageNotification {
            id: Uuid::new_v4(),
            sender: self.sender,
            recipient: self.recipient,
            message_id: self.message_id,
            channel_id: self.channel_id,
            message_text: self.message_text,
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/users/message-notification`
///
/// Missing fields deserialize as blank and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMessageNotificationRequest {
    /// Defaults to the authenticated caller when absent
    pub sender_id: Option<String>,
    pub recipient_id: String,
    pub message_id: String,
    pub channel_id: String,
    pub message_text: String,
}

/// Response for the unread counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCountResponse {
    pub count: i64,
}
