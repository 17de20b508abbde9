//! # Authentication Library
//!
//! Password hashing and JWT token management for the exchange API.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, encode_jwt, decode_jwt};

use thiserror::Error;

/// Errors produced while hashing passwords or handling tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Failed to hash password: {0}")]
    HashFailure(String),

    #[error("Failed to parse hash: {0}")]
    InvalidHash(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),
}
