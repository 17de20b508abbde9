//! # Auth Handler Tests
//!
//! Test suite for authentication handlers (signup and login), driven through
//! the full router so the middleware stack is exercised too.

mod login;

use crate::test_support::{json_request, response_json, setup_test_db, test_app, MockRates};
use axum::http::StatusCode;
use lib_core::dto::{AuthResponse, SignupRequest};
use serde_json::json;
use tower::ServiceExt;

/// Sign up a user through the API and return the parsed response.
pub async fn signup_user(
    app: &axum::Router,
    username: &str,
    email: &str,
    password: &str,
) -> AuthResponse {
    let req = SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(serde_json::to_value(&req).expect("Request should serialize")),
        ))
        .await
        .expect("Request should not fail");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    serde_json::from_value(body).expect("Signup response should parse")
}
