// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login/logout tests.
//!
//! These tests verify that:
//! 1. The code exchange sends the PKCE verifier and stores the token + subject
//! 2. API requests after login carry the new credentials
//! 3. A rejected exchange leaves the store untouched

use fitness_ai_client::models::Credentials;
use fitness_ai_client::services::{CancellationToken, CredentialStore, PkceChallenge};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::create_test_client;

/// Create a test access token for `sub`.
fn create_test_jwt(sub: &str) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 300,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"identity-provider-key"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_login_stores_token_and_subject() {
    let server = MockServer::start().await;
    let access_token = create_test_jwt("kc-user-42");
    let pkce = PkceChallenge::from_verifier("verifier-for-test");

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .and(body_string_contains("code_verifier=verifier-for-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "refresh_token": "refresh",
            "expires_in": 300,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .and(header("Authorization", format!("Bearer {}", access_token).as_str()))
        .and(header("X-User-ID", "kc-user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_test_client(&server, Credentials::default());
    let cancel = CancellationToken::new();

    let credentials = client
        .auth
        .login("auth-code-1", &pkce, &cancel)
        .await
        .expect("Login should succeed");

    assert_eq!(credentials.user_id(), Some("kc-user-42"));
    assert_eq!(store.load().unwrap(), credentials);

    client.repository.list_activities(&cancel).await.unwrap();
}

#[tokio::test]
async fn test_rejected_exchange_keeps_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&server)
        .await;

    let (client, store) = create_test_client(&server, Credentials::default());
    let err = client
        .auth
        .login(
            "stale-code",
            &PkceChallenge::from_verifier("v"),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("invalid_grant"));
    assert!(!store.load().unwrap().is_logged_in());
}

#[tokio::test]
async fn test_opaque_access_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "opaque-not-a-jwt"
        })))
        .mount(&server)
        .await;

    let (client, store) = create_test_client(&server, Credentials::default());
    let result = client
        .auth
        .login(
            "code",
            &PkceChallenge::from_verifier("v"),
            &CancellationToken::new(),
        )
        .await;

    assert!(result.is_err());
    assert!(!store.load().unwrap().is_logged_in());
}

#[tokio::test]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    let (client, store) = create_test_client(&server, Credentials::new("t", "u"));

    assert!(client.auth.current().unwrap().is_logged_in());
    client.auth.logout().unwrap();

    assert_eq!(store.load().unwrap(), Credentials::default());
}
