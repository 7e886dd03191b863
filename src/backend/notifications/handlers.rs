//! Notification HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};

use super::service;
use crate::backend::extract::ApiJson;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::NotificationInsert;
use crate::shared::social::{
    CreateMessageNotificationRequest, MessageNotification, MessageResponse,
    NotificationWithSender, UnreadCountResponse,
};

/// POST /api/users/message-notification
///
/// 201 with the new record, or 200 with the record already stored for the
/// same (sender, recipient, message id).
pub async fn create_message_notification(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
    ApiJson(request): ApiJson<CreateMessageNotificationRequest>,
) -> BackendResult<(StatusCode, Json<MessageNotification>)> {
    let outcome =
        service::create_message_notification(app_state.store.as_ref(), &me, request).await?;
    let status = match outcome {
        NotificationInsert::Created(_) => StatusCode::CREATED,
        NotificationInsert::Existing(_) => StatusCode::OK,
    };
    Ok((status, Json(outcome.into_inner())))
}

/// GET /api/users/message-notifications
pub async fn get_message_notifications(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<Vec<NotificationWithSender>>> {
    let notifications = service::message_notifications(app_state.store.as_ref(), &me).await?;
    Ok(Json(notifications))
}

/// PUT /api/users/message-notifications/read
pub async fn mark_notifications_read(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<MessageResponse>> {
    service::mark_notifications_read(app_state.store.as_ref(), &me).await?;
    Ok(Json(MessageResponse::new("Notifications marked as read")))
}

/// GET /api/users/notifications/unread-count
pub async fn get_unread_count(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<UnreadCountResponse>> {
    let count = service::unread_count(app_state.store.as_ref(), &me).await?;
    Ok(Json(UnreadCountResponse { count }))
}
