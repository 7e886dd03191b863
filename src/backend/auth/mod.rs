//! Authentication Module
//!
//! This module handles registration, login and session tokens. User records
//! live in the entity store; this module only deals with credentials and the
//! HTTP surface around them.
//!
//! # Architecture
//!
//! - **`sessions`** - JWT token generation, validation and the session cookie
//! - **`handlers`** - HTTP handlers for account endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: full name, email and password → user created → token returned and cookie set
//! 2. **Login**: email and password → credentials verified → token returned and cookie set
//! 3. **Protected routes**: the auth middleware resolves the token to a user on every request
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs, valid for the configured number of days
//! - Invalid credentials return 401 without revealing which part was wrong

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, onboard, signup};
pub use handlers::{AuthResponse, LoginRequest, SignupRequest, UserEnvelope};
