//! Notification Module
//!
//! - **`service`** - Message notification and unread counter operations
//! - **`handlers`** - HTTP handlers mounted under `/api/users`

pub mod service;
pub mod handlers;

pub use handlers::{
    create_message_notification, get_message_notifications, get_unread_count,
    mark_notifications_read,
};
