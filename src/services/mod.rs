// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client logic layer.

pub mod activity;
pub mod auth;
pub mod cache;
pub mod cancel;
pub mod credentials;
pub mod detail;
pub mod highlight;
pub mod transport;

pub use activity::ActivityRepository;
pub use auth::{AuthService, PkceChallenge, TokenResponse};
pub use cache::ActivityCache;
pub use cancel::CancellationToken;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use detail::{DetailResolver, DetailState, ResolvedActivity};
pub use highlight::{IndexSource, SystemIndexSource, WorkoutSplit};
pub use transport::Transport;
