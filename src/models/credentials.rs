// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Persisted login credentials.

use serde::{Deserialize, Serialize};

/// Token and user id written on login and read on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// OAuth access token (sent as `Authorization: Bearer`)
    #[serde(default)]
    pub token: Option<String>,
    /// User id, the token's `sub` claim (sent as `X-User-ID`)
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
        }
    }

    /// Token, ignoring empty strings.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// User id, ignoring empty strings.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|u| !u.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.bearer_token().is_some()
    }
}
