// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth2 authorization-code login with PKCE.
//!
//! The client is public (no secret), so the code exchange is bound to the
//! authorization request by an S256 code challenge. On success the access
//! token and its `sub` claim are written to the credential store, where the
//! transport picks them up for every API request.

use crate::config::OAuthConfig;
use crate::error::{AppError, Result};
use crate::models::Credentials;
use crate::services::cancel::CancellationToken;
use crate::services::credentials::CredentialStore;
use crate::services::transport::Transport;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use ring::rand::{SecureRandom, SystemRandom};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Random bytes behind the code verifier (43 base64url characters).
const VERIFIER_BYTES: usize = 32;

/// Random bytes behind the `state` parameter.
const STATE_BYTES: usize = 16;

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

impl PkceChallenge {
    /// Generate a fresh random verifier.
    pub fn generate() -> Result<Self> {
        Ok(Self::from_verifier(random_token(VERIFIER_BYTES)?))
    }

    /// Derive the challenge for a known verifier.
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

/// Random opaque `state` value for the authorization request.
pub fn generate_state() -> Result<String> {
    random_token(STATE_BYTES)
}

fn random_token(len: usize) -> Result<String> {
    let mut bytes = vec![0u8; len];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Build the URL the user opens to log in.
pub fn authorization_url(oauth: &OAuthConfig, pkce: &PkceChallenge, state: &str) -> String {
    format!(
        "{}?\
         client_id={}&\
         redirect_uri={}&\
         response_type=code&\
         scope={}&\
         state={}&\
         code_challenge={}&\
         code_challenge_method=S256",
        oauth.authorize_url,
        urlencoding::encode(&oauth.client_id),
        urlencoding::encode(&oauth.redirect_uri),
        urlencoding::encode(&oauth.scope),
        urlencoding::encode(state),
        pkce.challenge,
    )
}

/// Pull the authorization code out of what the user pasted back.
///
/// Accepts either the bare code or the full redirect URL. When the URL
/// carries a `state`, it must match `expected_state`.
pub fn extract_code(input: &str, expected_state: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidRequest("Empty authorization code".to_string()));
    }

    let Some((_, query)) = input.split_once('?') else {
        if input.contains("code=") {
            return parse_callback_query(input, expected_state);
        }
        return Ok(input.to_string());
    };

    parse_callback_query(query, expected_state)
}

fn parse_callback_query(query: &str, expected_state: &str) -> Result<String> {
    let mut code = None;
    let mut state = None;
    let mut error = None;

    for pair in query.split(['&', '#']) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map_err(|e| AppError::InvalidRequest(format!("Bad callback encoding: {}", e)))?
            .into_owned();
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AppError::InvalidRequest(format!("Authorization failed: {}", error)));
    }

    if let Some(state) = state {
        if state != expected_state {
            tracing::warn!("OAuth state mismatch, rejecting callback");
            return Err(AppError::InvalidRequest("OAuth state mismatch".to_string()));
        }
    }

    code.filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Callback has no authorization code".to_string()))
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Claims read from the access token.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
}

/// Read the `sub` claim of a JWT access token.
///
/// The signature is not checked here; the API gateway verifies the token
/// on every request. The claim only tells us which user id to send.
pub fn user_id_from_token(token: &str) -> Result<String> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::InvalidRequest(format!("Unreadable access token: {}", e)))?;

    if data.claims.sub.is_empty() {
        return Err(AppError::InvalidRequest(
            "Access token has an empty subject".to_string(),
        ));
    }
    Ok(data.claims.sub)
}

/// Login and logout against the identity provider.
#[derive(Clone)]
pub struct AuthService {
    transport: Transport,
    oauth: OAuthConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(
        transport: Transport,
        oauth: OAuthConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            transport,
            oauth,
            credentials,
        }
    }

    pub fn authorization_url(&self, pkce: &PkceChallenge, state: &str) -> String {
        authorization_url(&self.oauth, pkce, state)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce: &PkceChallenge,
        cancel: &CancellationToken,
    ) -> Result<TokenResponse> {
        let request = self
            .transport
            .http()
            .post(&self.oauth.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.oauth.client_id.as_str()),
                ("code", code),
                ("redirect_uri", self.oauth.redirect_uri.as_str()),
                ("code_verifier", pkce.verifier.as_str()),
            ])
            .build()
            .map_err(|e| AppError::InvalidRequest(format!("Token request: {}", e)))?;

        self.transport.send(request, cancel).await.map_err(|e| {
            tracing::error!(error = %e, "Token exchange failed");
            e
        })
    }

    /// Exchange the code and persist the resulting credentials.
    pub async fn login(
        &self,
        code: &str,
        pkce: &PkceChallenge,
        cancel: &CancellationToken,
    ) -> Result<Credentials> {
        let tokens = self.exchange_code(code, pkce, cancel).await?;
        let user_id = user_id_from_token(&tokens.access_token)?;

        let credentials = Credentials::new(tokens.access_token, user_id);
        self.credentials.save(&credentials)?;

        tracing::info!(user_id = credentials.user_id().unwrap_or_default(), "Logged in");
        Ok(credentials)
    }

    /// Forget the stored credentials.
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current(&self) -> Result<Credentials> {
        self.credentials.load()
    }
}
