//! # Login Tests
//!
//! Tests for user login functionality.

use super::*;

#[tokio::test]
async fn test_login_with_email() {
    let pool = setup_test_db().await;
    let app = test_app(pool, MockRates::empty());

    signup_user(&app, "testuser", "test@example.com", "TestPassword123!").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "test@example.com",
                "password": "TestPassword123!"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["user"]["username"], "testuser");
    assert_eq!(body["message"], "Login successful");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_username() {
    let pool = setup_test_db().await;
    let app = test_app(pool, MockRates::empty());

    signup_user(&app, "testuser", "test@example.com", "TestPassword123!").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "testuser",
                "password": "TestPassword123!"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = setup_test_db().await;
    let app = test_app(pool, MockRates::empty());

    signup_user(&app, "testuser", "test@example.com", "TestPassword123!").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "testuser",
                "password": "WrongPassword!"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let pool = setup_test_db().await;
    let app = test_app(pool, MockRates::empty());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "nobody",
                "password": "TestPassword123!"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_deactivated_account() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), MockRates::empty());

    let auth = signup_user(&app, "testuser", "test@example.com", "TestPassword123!").await;

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
        .bind(auth.user.id.parse::<i64>().unwrap())
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "testuser",
                "password": "TestPassword123!"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Account is deactivated");
}

#[tokio::test]
async fn test_login_updates_last_login() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), MockRates::empty());

    let auth = signup_user(&app, "testuser", "test@example.com", "TestPassword123!").await;
    let user_id: i64 = auth.user.id.parse().unwrap();

    let before: Option<String> =
        sqlx::query_scalar("SELECT last_login FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(before.is_none());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email_or_username": "testuser",
                "password": "TestPassword123!"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after: Option<String> =
        sqlx::query_scalar("SELECT last_login FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(after.is_some());
}
