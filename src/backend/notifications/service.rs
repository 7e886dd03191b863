//! Notification Service
//!
//! Message notifications plus the combined unread counter shown in the
//! navigation bar (pending friend requests + unread notifications).

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::{NotificationInsert, SocialStore};
use crate::shared::error::parse_id;
use crate::shared::social::{
    CreateMessageNotificationRequest, NewMessageNotification, NotificationWithSender, User,
};

/// Record a message notification, or return the one already stored
///
/// Idempotent on (sender, recipient, message id). `senderId` defaults to `me`.
///
/// # Errors
///
/// * `Validation` - Blank required field, malformed id, self-notification, unknown party
pub async fn create_message_notification(
    store: &dyn SocialStore,
    me: &User,
    request: CreateMessageNotificationRequest,
) -> BackendResult<NotificationInsert> {
    let sender = match request.sender_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_id("sender id", raw)?,
        _ => me.id,
    };

    if request.recipient_id.trim().is_empty()
        || request.message_id.trim().is_empty()
        || request.channel_id.trim().is_empty()
        || request.message_text.trim().is_empty()
    {
        return Err(BackendError::validation(
            "recipientId, messageId, channelId and messageText are required",
        ));
    }
    let recipient = parse_id("recipient id", &request.recipient_id)?;

    if sender == recipient {
        return Err(BackendError::validation("Cannot create notification for self"));
    }

    if let Some(existing) = store
        .find_notification(sender, recipient, request.message_id.trim())
        .await?
    {
        tracing::debug!("Notification for message {} already recorded", existing.message_id);
        return Ok(NotificationInsert::Existing(existing));
    }

    if sender != me.id && store.find_user(sender).await?.is_none() {
        return Err(BackendError::validation("Sender not found"));
    }
    if store.find_user(recipient).await?.is_none() {
        return Err(BackendError::validation("Recipient not found"));
    }

    let inserted = store
        .insert_notification(NewMessageNotification {
            sender,
            recipient,
            message_id: request.message_id.trim().to_string(),
            channel_id: request.channel_id.trim().to_string(),
            message_text: request.message_text,
        })
        .await?;

    if let NotificationInsert::Created(notification) = &inserted {
        tracing::info!(
            "Notification {} created for {} (message {})",
            notification.id,
            notification.recipient,
            notification.message_id
        );
    }
    Ok(inserted)
}

/// Unread notifications addressed to `me`, senders projected
pub async fn message_notifications(
    store: &dyn SocialStore,
    me: &User,
) -> BackendResult<Vec<NotificationWithSender>> {
    Ok(store.unread_notifications(me.id).await?)
}

/// Mark every unread notification for `me` as read
pub async fn mark_notifications_read(store: &dyn SocialStore, me: &User) -> BackendResult<u64> {
    let updated = store.mark_notifications_read(me.id).await?;
    tracing::debug!("Marked {} notifications read for {}", updated, me.id);
    Ok(updated)
}

/// Pending friend requests to `me` plus unread notifications to `me`
pub async fn unread_count(store: &dyn SocialStore, me: &User) -> BackendResult<i64> {
    let pending = store.count_pending_requests(me.id).await?;
    let unread = store.count_unread_notifications(me.id).await?;
    Ok(pending + unread)
}
