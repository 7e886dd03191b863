//! Friend Graph HTTP Handlers
//!
//! Thin wrappers translating `/api/users/*` requests into service calls.
//! The caller arrives as an `AuthUser` resolved by the auth middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::service;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::error::parse_id;
use crate::shared::social::{
    FriendProfile, FriendRequest, FriendRequestsResponse, MessageResponse,
    OutgoingFriendRequest, User,
};

/// GET /api/users
pub async fn get_recommended_users(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<Vec<User>>> {
    let users = service::recommended_users(app_state.store.as_ref(), &me).await?;
    Ok(Json(users))
}

/// GET /api/users/friends
pub async fn get_my_friends(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<Vec<FriendProfile>>> {
    let friends = service::my_friends(app_state.store.as_ref(), &me).await?;
    Ok(Json(friends))
}

/// POST /api/users/friend-request/{id}
pub async fn send_friend_request(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
    Path(recipient_id): Path<String>,
) -> BackendResult<(StatusCode, Json<FriendRequest>)> {
    let recipient_id = parse_id("recipient id", &recipient_id)?;
    let request = service::send_friend_request(app_state.store.as_ref(), &me, recipient_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// PUT /api/users/friend-request/{id}/accept
pub async fn accept_friend_request(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
    Path(request_id): Path<String>,
) -> BackendResult<Json<MessageResponse>> {
    let request_id = parse_id("friend request id", &request_id)?;
    service::accept_friend_request(app_state.store.as_ref(), &me, request_id).await?;
    Ok(Json(MessageResponse::new("Friend request accepted")))
}

/// GET /api/users/friend-requests
pub async fn get_friend_requests(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<FriendRequestsResponse>> {
    let requests = service::friend_requests(app_state.store.as_ref(), &me).await?;
    Ok(Json(requests))
}

/// GET /api/users/outgoing-friend-requests
pub async fn get_outgoing_friend_requests(
    State(app_state): State<AppState>,
    AuthUser(me): AuthUser,
) -> BackendResult<Json<Vec<OutgoingFriendRequest>>> {
    let requests = service::outgoing_friend_requests(app_state.store.as_ref(), &me).await?;
    Ok(Json(requests))
}
