//! Friend Graph Module
//!
//! - **`service`** - Recommendation, friend list and friend request operations
//! - **`handlers`** - HTTP handlers mounted under `/api/users`

pub mod service;
pub mod handlers;

pub use handlers::{
    accept_friend_request, get_friend_requests, get_my_friends, get_outgoing_friend_requests,
    get_recommended_users, send_friend_request,
};
