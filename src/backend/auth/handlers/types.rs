/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by account handlers,
 * plus the small input checks shared by signup and login.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::social::User;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign up request
///
/// Missing fields deserialize as empty strings so they surface as a 400.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    /// Plain-text password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login. The token is also installed as the `jwt` cookie.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    /// User information (never includes the password hash)
    pub user: User,
    pub token: String,
}

/// `{ success, user }` envelope returned by onboarding and `me`
#[derive(Serialize, Deserialize, Debug)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: User,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Basic email shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Generated avatar for a new account, stable for a given id
pub fn avatar_url(user_id: Uuid) -> String {
    let index = (user_id.as_u128() % 100) + 1;
    format!("https://avatar.iran.liara.run/public/{}.png", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn test_avatar_url_in_range() {
        for _ in 0..50 {
            let url = avatar_url(Uuid::new_v4());
            let n: u32 = url
                .trim_start_matches("https://avatar.iran.liara.run/public/")
                .trim_end_matches(".png")
                .parse()
                .unwrap();
            assert!((1..=100).contains(&n));
        }
    }

    #[test]
    fn test_signup_request_defaults_missing_fields() {
        let request: SignupRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(request.email, "a@b.co");
        assert!(request.full_name.is_empty());
        assert!(request.password.is_empty());
    }
}
