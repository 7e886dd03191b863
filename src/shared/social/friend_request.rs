//! Friend Request Data Structure
//!
//! Represents friend requests between users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{FriendProfile, UserBadge};
use crate::shared::error::SharedError;

/// Status of a friend request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    /// Request is waiting for the recipient
    #[default]
    Pending,
    /// Request was accepted; the pair are friends
    Accepted,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SharedError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(FriendRequestStatus::Pending),
            "accepted" => Ok(FriendRequestStatus::Accepted),
            other => Err(SharedError::validation(
                "status",
                format!("Unknown friend request status '{}'", other),
            )),
        }
    }
}

/// A friend request
///
/// `S` and `R` describe how the sender and recipient are represented: plain
/// ids for the stored record, profile projections in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest<S = Uuid, R = Uuid> {
    /// Unique request ID
    pub id: Uuid,
    /// User who sent the request
    pub sender: S,
    /// User who received the request
    pub recipient: R,
    /// Current status of the request
    #[serde(default)]
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pending request addressed to the caller, sender projected
pub type IncomingFriendRequest = FriendRequest<FriendProfile, Uuid>;

/// Request sent by the caller and accepted, recipient projected
pub type AcceptedFriendRequest = FriendRequest<Uuid, UserBadge>;

/// Pending request sent by the caller, recipient projected
pub type OutgoingFriendRequest = FriendRequest<Uuid, FriendProfile>;

impl FriendRequest {
    /// Create a new pending friend request
    pub fn new(sender: Uuid, recipient: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sender,
            recipient,
            status: FriendRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this request links `a` and `b`, in either direction
    pub fn connects(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }
}

impl<S, R> FriendRequest<S, R> {
    /// Check if the request is pending
    pub fn is_pending(&self) -> bool {
        self.status == FriendRequestStatus::Pending
    }

    /// Replace the sender and recipient representations
    pub fn with_parties<S2, R2>(self, sender: S2, recipient: R2) -> FriendRequest<S2, R2> {
        FriendRequest {
            id: self.id,
            sender,
            recipient,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Response for listing friend requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestsResponse {
    pub incoming_reqs: Vec<IncomingFriendRequest>,
    pub accepted_reqs: Vec<AcceptedFriendRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_strings() {
        assert_eq!(FriendRequestStatus::parse("Accepted").unwrap(), FriendRequestStatus::Accepted);
        assert_eq!(FriendRequestStatus::Pending.as_str(), "pending");
        assert!(FriendRequestStatus::parse("rejected").is_err());
    }

    #[test]
    fn test_connects_either_direction() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let request = FriendRequest::new(a, b);
        assert!(request.is_pending());
        assert!(request.connects(a, b));
        assert!(request.connects(b, a));
        assert!(!request.connects(a, c));
    }

    #[test]
    fn test_serialized_shape() {
        let request = FriendRequest::new(Uuid::new_v4(), Uuid::new_v4());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["sender"], request.sender.to_string());
    }
}
