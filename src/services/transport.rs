// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP transport for the fitness API.
//!
//! Handles:
//! - Bearer token and user id headers, read from the credential store per request
//! - Mapping failures onto `AppError` (network / server / not found / decode)
//! - Dropping responses once the caller's cancellation token fires

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::cancel::CancellationToken;
use crate::services::credentials::CredentialStore;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the logged-in user's id.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Configured HTTP client bound to the API base URL.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl Transport {
    /// Create a transport for `config.api_url`.
    pub fn new(config: &Config, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::InvalidRequest(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// GET `path` and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.request::<(), T>(Method::GET, path, None, cancel).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, cancel: &CancellationToken) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), cancel).await
    }

    /// Send an authenticated request relative to the base URL.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(method, path, body)?;
        self.send(request, cancel).await
    }

    /// Build a request with whatever credentials are currently stored.
    fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request> {
        let url = format!("{}{}", self.base_url, path);
        let credentials = self.credentials.load()?;

        let mut builder = self.http.request(method, &url);

        // Missing credentials are not an error; the server decides.
        if let Some(token) = credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(user_id) = credentials.user_id() {
            builder = builder.header(USER_ID_HEADER, user_id);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| AppError::InvalidRequest(format!("{}: {}", url, e)))
    }

    /// Execute a prepared request, racing it against `cancel`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
        cancel: &CancellationToken,
    ) -> Result<T> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(method = %method, path = %path, "Sending request");

        let exchange = async {
            let response = self.http.execute(request).await.map_err(map_send_error)?;
            check_response_json(response, &path).await
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(method = %method, path = %path, "Request cancelled, dropping response");
                Err(AppError::Cancelled)
            }
            result = exchange => result,
        }
    }
}

/// Map a `reqwest` send failure onto the error taxonomy.
fn map_send_error(e: reqwest::Error) -> AppError {
    if e.is_builder() {
        AppError::InvalidRequest(e.to_string())
    } else {
        AppError::Network(e.to_string())
    }
}

/// Check response status and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 404 {
            return Err(AppError::NotFound(path.to_string()));
        }

        tracing::warn!(status = status.as_u16(), path, "API request failed");
        return Err(AppError::Server {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
}
