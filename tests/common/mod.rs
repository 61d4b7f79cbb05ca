// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitness_ai_client::config::Config;
use fitness_ai_client::models::Credentials;
use fitness_ai_client::services::MemoryCredentialStore;
use fitness_ai_client::FitnessClient;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";
pub const TEST_USER_ID: &str = "user-1";

/// Config pointing both the API and the token endpoint at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::with_api_url(server.uri());
    config.oauth.token_url = format!("{}/token", server.uri());
    config
}

/// Create a client against the mock server with the given credentials.
/// Returns the client and its credential store.
#[allow(dead_code)]
pub fn create_test_client(
    server: &MockServer,
    credentials: Credentials,
) -> (FitnessClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new(credentials));
    let client = FitnessClient::new(test_config(server), store.clone())
        .expect("Failed to build test client");
    (client, store)
}

/// Client logged in as `TEST_USER_ID`.
#[allow(dead_code)]
pub fn logged_in_client(server: &MockServer) -> FitnessClient {
    create_test_client(server, Credentials::new(TEST_TOKEN, TEST_USER_ID)).0
}

/// Activity as the list endpoint returns it.
#[allow(dead_code)]
pub fn activity_json(id: Value, activity_type: &str, duration: u32, calories: u32) -> Value {
    json!({
        "id": id,
        "userId": TEST_USER_ID,
        "type": activity_type,
        "duration": duration,
        "caloriesBurned": calories,
        "createdAt": "2025-06-01T10:15:00"
    })
}
