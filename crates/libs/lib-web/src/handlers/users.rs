//! # User Profile Handlers
//!
//! Authenticated endpoints for reading and updating the current user's
//! profile. The authenticated user comes from the `Claims` injected by the
//! auth middleware; there is no way to address another user's profile.

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{hash_password, AuthError, Claims};
use lib_core::model::store::{models::UserForUpdate, UserRepository};
use lib_core::{
    dto::{ErrorResponse, UserInfo, UserUpdateRequest},
    DbPool,
};
use lib_utils::validation::{validate_email, validate_min_length};
use tracing::{error, info, warn};

fn internal_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
}

/// `GET /api/users/me` - return the authenticated user's profile.
pub async fn me(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, (StatusCode, Json<ErrorResponse>)> {
    let user_id = claims
        .user_id()
        .map_err(|_| internal_error("Invalid token subject"))?;

    let user = match UserRepository::find_by_id(&pool, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("[USERS] Token for missing user id {}", user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "User not found".to_string(),
                }),
            ));
        }
        Err(e) => {
            error!("[USERS] Database error: {}", e);
            return Err(internal_error("Database error"));
        }
    };

    Ok(Json(UserInfo {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        created_at: user.created_at.to_rfc3339(),
    }))
}

/// `PUT /api/users/me` - partial profile update.
///
/// Only fields present in the body change. Username and email keep their
/// uniqueness guarantees; a new password goes through the same hashing and
/// length rules as signup.
pub async fn update_me(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserInfo>, (StatusCode, Json<ErrorResponse>)> {
    let user_id = claims
        .user_id()
        .map_err(|_| internal_error("Invalid token subject"))?;

    let mut update = UserForUpdate::new();

    if let Some(username) = req.username {
        validate_min_length(&username, 3, "Username").map_err(bad_request)?;

        match UserRepository::find_by_username(&pool, &username).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "Username already taken".to_string(),
                    }),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                error!("[USERS] Database error checking username: {}", e);
                return Err(internal_error("Database error"));
            }
        }

        update = update.username(username);
    }

    if let Some(email) = req.email {
        validate_email(&email).map_err(bad_request)?;

        match UserRepository::find_by_email(&pool, &email).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "Email already registered".to_string(),
                    }),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                error!("[USERS] Database error checking email: {}", e);
                return Err(internal_error("Database error"));
            }
        }

        update = update.email(email);
    }

    if let Some(password) = req.password {
        let hash = match hash_password(&password) {
            Ok(hash) => hash,
            Err(e @ AuthError::PasswordTooShort) => {
                return Err(bad_request(e.to_string()));
            }
            Err(e) => {
                error!("[USERS] Password hashing failed: {}", e);
                return Err(internal_error("Failed to process password"));
            }
        };
        update = update.password_hash(hash);
    }

    let user = match UserRepository::update(&pool, user_id, update).await {
        Ok(user) => user,
        Err(e) => {
            error!("[USERS] Failed to update user {}: {}", user_id, e);
            return Err(internal_error("Failed to update user"));
        }
    };

    info!("[USERS] Profile updated for {} (id: {})", user.username, user.id);

    Ok(Json(UserInfo {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        created_at: user.created_at.to_rfc3339(),
    }))
}
