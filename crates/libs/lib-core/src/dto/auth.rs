//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the account endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth/signup` - [`SignupRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `GET /api/users/me` - [`UserInfo`]
//! - `PUT /api/users/me` - [`UserUpdateRequest`] -> [`UserInfo`]
//!
//! ## Wire Format
//!
//! All DTOs use **snake_case** field names in JSON (default serde behavior).

use serde::{Deserialize, Serialize};

/// Login request with email or username.
///
/// # Fields
///
/// * `email_or_username` - Either an email (contains `@`) or a username
/// * `password` - Plaintext password (hashed server-side)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

/// Signup request for new user registration.
///
/// # Validation Rules (Server-Side)
///
/// - Username must be at least 3 characters
/// - Email must be valid format and not already registered
/// - Password must be at least 8 characters
/// - Both username and email must be unique
///
/// Registration also seeds the user's exchange-credit balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update. Only provided fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Authentication response returned on successful login or signup.
///
/// The `token` field should be included in subsequent API requests as:
/// ```text
/// Authorization: Bearer <token>
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub message: String,
}

/// User information (public, safe to send to client).
///
/// Never includes sensitive data like password hashes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Standard error response body.
///
/// Every error endpoint returns `{"error": "<message>"}` under this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
