// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-slot cache of the last fetched activity collection.
//!
//! Not a general cache: one slot, no expiry, no invalidation. Every
//! successful list fetch replaces the slot wholesale and the last writer
//! wins. Readers must treat the contents as possibly stale.

use crate::models::Activity;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared slot holding the most recent activity collection.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ActivityCache {
    slot: Arc<RwLock<Option<Vec<Activity>>>>,
}

impl ActivityCache {
    /// Create an empty (never populated) cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stored collection, or `None` if nothing was ever stored.
    ///
    /// An empty collection is a populated slot.
    pub fn get(&self) -> Option<Vec<Activity>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the slot contents.
    pub fn set(&self, activities: Vec<Activity>) {
        let count = activities.len();
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(activities);
        tracing::debug!(count, "Activity cache replaced");
    }

    pub fn is_populated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
