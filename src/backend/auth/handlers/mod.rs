//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Session cookie removal
//! ├── onboard.rs  - Profile completion handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`logout`** - POST /api/auth/logout
//! - **`onboard`** - POST /api/auth/onboarding (authenticated)
//! - **`get_me`** - GET /api/auth/me (authenticated)

/// Request and response types
pub mod types;

pub mod signup;
pub mod login;
pub mod logout;
pub mod onboard;
pub mod me;

pub use types::{AuthResponse, LoginRequest, LogoutResponse, SignupRequest, UserEnvelope};

pub use signup::signup;
pub use login::login;
pub use logout::logout;
pub use onboard::onboard;
pub use me::get_me;
