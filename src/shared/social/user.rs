//! User Data Structures
//!
//! The full user record plus the two profile projections embedded in friend
//! and notification listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user, without credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    /// Avatar URL
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    /// Whether the user completed onboarding (gates recommendations)
    pub is_onboarded: bool,
    /// Ids of accepted friends; never contains `id`
    pub friends: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether `other` is in this user's friend set
    pub fn is_friends_with(&self, other: Uuid) -> bool {
        self.friends.contains(&other)
    }

    /// Full profile projection
    pub fn profile(&self) -> FriendProfile {
        FriendProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
            native_language: self.native_language.clone(),
            learning_language: self.learning_language.clone(),
        }
    }

    /// Name-and-avatar projection
    pub fn badge(&self) -> UserBadge {
        UserBadge {
            id: self.id,
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

/// Profile projection used for friends and pending requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    pub id: Uuid,
    pub full_name: String,
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
}

/// Name-and-avatar projection used for accepted requests and notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: Uuid,
    pub full_name: String,
    pub profile_pic: String,
}

/// Fields needed to register a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_pic: String,
}

/// Profile fields collected during onboarding
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingProfile {
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
}

impl OnboardingProfile {
    /// Names of the fields left blank, in wire format
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("bio", &self.bio),
            ("nativeLanguage", &self.native_language),
            ("learningLanguage", &self.learning_language),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            bio: String::new(),
            profile_pic: "pic.png".to_string(),
            native_language: "english".to_string(),
            learning_language: "spanish".to_string(),
            location: String::new(),
            is_onboarded: true,
            friends: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("fullName").is_some());
        assert!(json.get("isOnboarded").is_some());
        assert!(json.get("profilePic").is_some());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_projections() {
        let user = user();
        let profile = user.profile();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.learning_language, "spanish");
        let badge = user.badge();
        assert_eq!(badge.full_name, "Ada");
    }

    #[test]
    fn test_missing_fields() {
        let profile = OnboardingProfile {
            full_name: "Ada".to_string(),
            bio: "  ".to_string(),
            native_language: "english".to_string(),
            ..Default::default()
        };
        assert_eq!(
            profile.missing_fields(),
            vec!["bio", "learningLanguage", "location"]
        );
    }
}
