// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness AI client: log workouts and read their AI recommendations.
//!
//! This crate provides the client core for the fitness-tracking API:
//! an authenticated transport, a single-slot activity cache, the activity
//! repository, and the detail flow that backfills partial detail records
//! from the activity list.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

use config::Config;
use error::Result;
use services::{
    ActivityCache, ActivityRepository, AuthService, CredentialStore, DetailResolver,
    FileCredentialStore, Transport,
};
use std::sync::Arc;

/// Wired-up client components sharing one transport and cache slot.
#[derive(Clone)]
pub struct FitnessClient {
    pub config: Config,
    pub repository: ActivityRepository,
    pub detail: DetailResolver,
    pub auth: AuthService,
}

impl FitnessClient {
    /// Build a client whose credentials live in `credentials`.
    pub fn new(config: Config, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = Transport::new(&config, credentials.clone())?;
        let repository = ActivityRepository::new(transport.clone(), ActivityCache::new());
        let detail = DetailResolver::new(repository.clone());
        let auth = AuthService::new(transport, config.oauth.clone(), credentials);

        Ok(Self {
            config,
            repository,
            detail,
            auth,
        })
    }

    /// Build a client using the credentials file named in the config.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
        Self::new(config, store)
    }
}
