// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity repository: list, create and fetch detail.
//!
//! Errors from the transport propagate unchanged; nothing here retries.

use crate::error::Result;
use crate::models::{Activity, NewActivity};
use crate::services::cache::ActivityCache;
use crate::services::cancel::CancellationToken;
use crate::services::transport::Transport;

/// API paths, relative to the configured base URL.
pub mod endpoints {
    pub const ACTIVITIES: &str = "/activities";
    pub const ACTIVITY_RECOMMENDATION: &str = "/recommendations/activity";

    /// Detail path for one activity, with the id percent-encoded.
    pub fn activity_detail(id: &str) -> String {
        format!("{}/{}", ACTIVITY_RECOMMENDATION, urlencoding::encode(id))
    }
}

/// Activity operations over the transport, sharing one cache slot.
#[derive(Clone)]
pub struct ActivityRepository {
    transport: Transport,
    cache: ActivityCache,
}

impl ActivityRepository {
    pub fn new(transport: Transport, cache: ActivityCache) -> Self {
        Self { transport, cache }
    }

    /// Fetch every activity for the logged-in user and store it in the cache.
    pub async fn list_activities(&self, cancel: &CancellationToken) -> Result<Vec<Activity>> {
        let activities: Vec<Activity> = self
            .transport
            .get_json(endpoints::ACTIVITIES, cancel)
            .await?;

        tracing::info!(count = activities.len(), "Fetched activities");
        self.cache.set(activities.clone());
        Ok(activities)
    }

    /// Submit a new activity and return the server's record.
    pub async fn create_activity(
        &self,
        activity: &NewActivity,
        cancel: &CancellationToken,
    ) -> Result<Activity> {
        let created: Activity = self
            .transport
            .post_json(endpoints::ACTIVITIES, activity, cancel)
            .await?;

        tracing::info!(
            id = %created.id.as_ref().map(|id| id.as_key()).unwrap_or_default(),
            activity_type = %activity.activity_type,
            "Activity created"
        );
        Ok(created)
    }

    /// Fetch one activity with whatever recommendation fields exist so far.
    pub async fn get_activity_detail(&self, id: &str, cancel: &CancellationToken) -> Result<Activity> {
        self.transport
            .get_json(&endpoints::activity_detail(id), cancel)
            .await
    }

    /// Contents of the cache slot, without any network call.
    pub fn cached_activities(&self) -> Option<Vec<Activity>> {
        self.cache.get()
    }
}
