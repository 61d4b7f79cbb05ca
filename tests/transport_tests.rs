// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transport tests.
//!
//! These tests verify that:
//! 1. Credentials are attached as headers when present, and omitted when not
//! 2. Failures map onto the error taxonomy
//! 3. Cancellation drops the pending response

use fitness_ai_client::config::Config;
use fitness_ai_client::error::AppError;
use fitness_ai_client::models::Credentials;
use fitness_ai_client::services::{CancellationToken, CredentialStore, MemoryCredentialStore};
use fitness_ai_client::FitnessClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{create_test_client, logged_in_client, TEST_TOKEN, TEST_USER_ID};

#[tokio::test]
async fn test_attaches_bearer_and_user_id_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("X-User-ID", TEST_USER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let activities = client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .expect("List should succeed");

    assert!(activities.is_empty());
}

#[tokio::test]
async fn test_no_credentials_sends_no_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = create_test_client(&server, Credentials::default());
    client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .expect("Unauthenticated request should still be sent");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(!requests[0].headers.contains_key("x-user-id"));
}

#[tokio::test]
async fn test_credentials_read_per_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, store) = create_test_client(&server, Credentials::default());
    let cancel = CancellationToken::new();

    client.repository.list_activities(&cancel).await.unwrap();

    // Login happens between requests; the next request picks it up.
    store.save(&Credentials::new("fresh-token", "user-9")).unwrap();
    client.repository.list_activities(&cancel).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer fresh-token"
    );
    assert_eq!(requests[1].headers.get("x-user-id").unwrap(), "user-9");
}

#[tokio::test]
async fn test_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommendations/activity/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let err = client
        .repository
        .get_activity_detail("missing", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "Expected NotFound, got {:?}", err);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_500_maps_to_server_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let err = client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        AppError::Server { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database down");
        }
        other => panic!("Expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(MemoryCredentialStore::new(Credentials::new(TEST_TOKEN, TEST_USER_ID)));
    let client = FitnessClient::new(Config::with_api_url(format!("http://{}", addr)), store)
        .expect("Failed to build client");

    let err = client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_network(), "Expected Network error, got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unparseable_base_url_is_invalid_request() {
    let store = Arc::new(MemoryCredentialStore::new(Credentials::new(TEST_TOKEN, TEST_USER_ID)));
    let client = FitnessClient::new(Config::with_api_url("not a url"), store)
        .expect("Client construction does not validate the URL");

    let err = client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::InvalidRequest(_)),
        "Expected InvalidRequest, got {:?}",
        err
    );
    assert_eq!(err.status(), None);
    assert!(!err.is_network());
    assert!(client.repository.cached_activities().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let err = client
        .repository
        .list_activities(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_cancel_drops_pending_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "1", "type": "RUNNING", "duration": 10, "caloriesBurned": 90}]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.repository.list_activities(&cancel),
    )
    .await
    .expect("Cancellation should not wait for the slow response");

    assert!(matches!(result, Err(AppError::Cancelled)));
    assert!(
        client.repository.cached_activities().is_none(),
        "Cancelled list must not write the cache"
    );
}

#[tokio::test]
async fn test_already_cancelled_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client.repository.list_activities(&cancel).await;
    assert!(matches!(result, Err(AppError::Cancelled)));
}
