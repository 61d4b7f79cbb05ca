// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_CREDENTIALS_PATH: &str = ".fitness-ai/credentials.json";
const DEFAULT_AUTHORIZE_URL: &str =
    "http://localhost:8181/realms/fitness-oauth2/protocol/openid-connect/auth";
const DEFAULT_TOKEN_URL: &str =
    "http://localhost:8181/realms/fitness-oauth2/protocol/openid-connect/token";
const DEFAULT_CLIENT_ID: &str = "oauth2-pkce-client";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173";
const DEFAULT_SCOPE: &str = "openid profile email offline_access";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the fitness API (all request paths are relative to it)
    pub api_url: String,
    /// Where login persists the token and user id
    pub credentials_path: PathBuf,
    /// Per-request timeout. `None` means requests may hang until cancelled.
    pub request_timeout: Option<Duration>,
    pub oauth: OAuthConfig,
}

/// OAuth2 authorization-code + PKCE settings.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub authorize_url: String,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl Default for Config {
    /// Default config for testing and local development.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            request_timeout: None,
            oauth: OAuthConfig::default(),
        }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a local-development default; only malformed values fail.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let request_timeout = match env::var("FITNESS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("FITNESS_REQUEST_TIMEOUT_SECS", raw))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_url: var_or("FITNESS_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            credentials_path: PathBuf::from(var_or(
                "FITNESS_CREDENTIALS_PATH",
                DEFAULT_CREDENTIALS_PATH,
            )),
            request_timeout,
            oauth: OAuthConfig {
                authorize_url: var_or("OAUTH_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
                token_url: var_or("OAUTH_TOKEN_URL", DEFAULT_TOKEN_URL),
                client_id: var_or("OAUTH_CLIENT_ID", DEFAULT_CLIENT_ID),
                redirect_uri: var_or("OAUTH_REDIRECT_URI", DEFAULT_REDIRECT_URI),
                scope: var_or("OAUTH_SCOPE", DEFAULT_SCOPE),
            },
        })
    }

    /// Config pointing at a specific API base URL (tests, embedders).
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| default.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
