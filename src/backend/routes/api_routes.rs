/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Accounts
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Clear the session cookie
 * - `POST /api/auth/onboarding` - Complete profile (authenticated)
 * - `GET /api/auth/me` - Current user (authenticated)
 *
 * ## Friend graph and notifications (all authenticated)
 * - `GET /api/users` - Recommended users
 * - `GET /api/users/friends` - Caller's friends
 * - `POST /api/users/friend-request/{id}` - Send a friend request
 * - `PUT /api/users/friend-request/{id}/accept` - Accept a friend request
 * - `GET /api/users/friend-requests` - Incoming and accepted requests
 * - `GET /api/users/outgoing-friend-requests` - Pending requests sent by caller
 * - `POST /api/users/message-notification` - Record a message notification
 * - `GET /api/users/message-notifications` - Unread notifications
 * - `PUT /api/users/message-notifications/read` - Mark all read
 * - `GET /api/users/notifications/unread-count` - Combined unread counter
 */

use axum::{
    middleware,
    routing::{any, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, logout, onboard, signup};
use crate::backend::error::BackendError;
use crate::backend::friends::{
    accept_friend_request, get_friend_requests, get_my_friends, get_outgoing_friend_requests,
    get_recommended_users, send_friend_request,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::notifications::{
    create_message_notification, get_message_notifications, get_unread_count,
    mark_notifications_read,
};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/onboarding", post(onboard))
        .route("/api/auth/me", get(get_me))
        .route("/api/users", get(get_recommended_users))
        .route("/api/users/friends", get(get_my_friends))
        .route("/api/users/friend-request/{id}", post(send_friend_request))
        .route("/api/users/friend-request/{id}/accept", put(accept_friend_request))
        .route("/api/users/friend-requests", get(get_friend_requests))
        .route("/api/users/outgoing-friend-requests", get(get_outgoing_friend_requests))
        .route("/api/users/message-notification", post(create_message_notification))
        .route("/api/users/message-notifications", get(get_message_notifications))
        .route("/api/users/message-notifications/read", put(mark_notifications_read))
        .route("/api/users/notifications/unread-count", get(get_unread_count))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(protected)
        .route("/api/{*rest}", any(api_not_found))
}

async fn api_not_found() -> BackendError {
    BackendError::not_found("Route not found")
}
