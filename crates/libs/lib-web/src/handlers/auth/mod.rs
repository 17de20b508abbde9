//! # Authentication Handlers
//!
//! HTTP request handlers for user authentication endpoints.
//!
//! ## Overview
//!
//! This module implements the authentication flow including:
//! - User signup with email/password
//! - User login with email or username
//! - JWT token generation
//!
//! Signup also seeds the new account's exchange-credit balance; the user row
//! and the balance row are created in one transaction inside the repository.

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, verify_password, AuthError};
use lib_core::model::store::UserRepository;
use lib_core::{
    dto::{AuthResponse, ErrorResponse, LoginRequest, SignupRequest, UserInfo},
    Config, DbPool,
};
use lib_utils::validation::{validate_email, validate_min_length};
use tracing::{debug, error, info, instrument, warn};

/// Signup handler - creates a new user account.
///
/// # Returns
///
/// * `Ok((StatusCode::CREATED, AuthResponse))` - User created with JWT token
/// * `Err((StatusCode, ErrorResponse))` - Validation error, duplicate user, or server error
///
/// # Validation
///
/// - Username must be at least 3 characters
/// - Email must contain '@' symbol
/// - Email and username must be unique
/// - Password must be at least 8 characters (validated in hash_password)
#[instrument(skip(pool, config, req), fields(username = %req.username, email = %req.email))]
pub async fn signup(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    info!("[SIGNUP] New user signup request");
    debug!("   Username: {}", req.username);
    debug!("   Email: {}", req.email);

    if let Err(e) = validate_min_length(&req.username, 3, "Username") {
        warn!("[SIGNUP] Username too short");
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
    }

    if let Err(e) = validate_email(&req.email) {
        warn!("[SIGNUP] Invalid email format");
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
    }

    match UserRepository::find_by_email(&pool, &req.email).await {
        Ok(Some(_)) => {
            warn!("[SIGNUP] Email already registered: {}", req.email);
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "Email already registered".to_string(),
                }),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("[SIGNUP] Database error checking email: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    }

    match UserRepository::find_by_username(&pool, &req.username).await {
        Ok(Some(_)) => {
            warn!("[SIGNUP] Username already taken: {}", req.username);
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "Username already taken".to_string(),
                }),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("[SIGNUP] Database error checking username: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    }

    // Hash password (also enforces minimum length)
    let password_hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e @ AuthError::PasswordTooShort) => {
            warn!("[SIGNUP] Password too short");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
        Err(e) => {
            error!("[SIGNUP] Password hashing failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to process password".to_string(),
                }),
            ));
        }
    };

    // Create user; this also seeds the exchange-credit balance
    let user = match UserRepository::create(&pool, &req.username, &req.email, &password_hash).await
    {
        Ok(user) => user,
        Err(e) => {
            error!("[SIGNUP] Failed to create user: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            ));
        }
    };

    // Generate JWT
    let token = match encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ) {
        Ok(token) => token,
        Err(e) => {
            error!("[SIGNUP] JWT encoding failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate token".to_string(),
                }),
            ));
        }
    };

    info!("[SIGNUP] User created: {} (id: {})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserInfo {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
                created_at: user.created_at.to_rfc3339(),
            },
            token,
            message: "Signup successful".to_string(),
        }),
    ))
}

/// Login handler - authenticates existing user.
///
/// # Authentication
///
/// - Accepts either email (contains '@') or username
/// - Verifies password using Argon2
/// - Checks if account is active
/// - Updates last_login timestamp
/// - Generates JWT token with user claims
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    info!("[LOGIN] Login attempt");
    debug!("   Identifier: {}", req.email_or_username);

    // Find user by email or username
    let user = if req.email_or_username.contains('@') {
        UserRepository::find_by_email(&pool, &req.email_or_username).await
    } else {
        UserRepository::find_by_username(&pool, &req.email_or_username).await
    };

    let user = match user {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("[LOGIN] User not found: {}", req.email_or_username);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid credentials".to_string(),
                }),
            ));
        }
        Err(e) => {
            error!("[LOGIN] Database error: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    };

    // Check if user is active
    if !user.is_active {
        warn!("[LOGIN] Account deactivated: {}", user.username);
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Account is deactivated".to_string(),
            }),
        ));
    }

    // Verify password
    let is_valid = match verify_password(&req.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!("[LOGIN] Password verification error: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Authentication error".to_string(),
                }),
            ));
        }
    };

    if !is_valid {
        warn!("[LOGIN] Invalid password for user: {}", user.username);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid credentials".to_string(),
            }),
        ));
    }

    // Update last login; a failure here should not block the login
    let _ = UserRepository::update_last_login(&pool, user.id).await;

    // Generate JWT
    let token = match encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ) {
        Ok(token) => token,
        Err(e) => {
            error!("[LOGIN] JWT encoding failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate token".to_string(),
                }),
            ));
        }
    };

    info!(
        "[LOGIN] User authenticated: {} (id: {})",
        user.username, user.id
    );

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: UserInfo {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
                created_at: user.created_at.to_rfc3339(),
            },
            token,
            message: "Login successful".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests;
