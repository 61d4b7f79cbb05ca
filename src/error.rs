// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error taxonomy.
//!
//! Callers branch on these variants to pick fallback behavior, so the
//! transport keeps "never reached the server" apart from "server said no".

/// Application error type surfaced by the transport and everything above it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request never produced a response (connect, DNS, reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived with a non-2xx status.
    #[error("Server error: HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The server answered 404 for the requested resource.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request could not be built locally.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The caller cancelled before the response arrived.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Credential store error: {0}")]
    Credentials(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            AppError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;
