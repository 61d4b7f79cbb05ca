// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity detail resolution.
//!
//! The detail endpoint can return a record whose core fields (type,
//! duration, calories) are missing, either because the recommendation
//! service wrote the record before those fields were copied or because it
//! omits them. The list endpoint always carries them, so a missing field is
//! backfilled from the cached list, or from a fresh list fetch when the
//! cache slot has never been filled.
//!
//! Workflow:
//! 1. Fetch the detail record (failure is terminal, no fallback)
//! 2. Check whether any core field is falsy
//! 3. If so, find the same id in the cached or freshly listed collection
//! 4. Merge: primary value if truthy, else fallback value, else empty

use crate::error::{AppError, Result};
use crate::models::{Activity, RecommendationItem};
use crate::services::activity::ActivityRepository;
use crate::services::cancel::CancellationToken;

/// Lifecycle of one detail screen.
///
/// A screen starts in `Loading`; [`DetailResolver::load`] returns only the
/// terminal states.
#[derive(Debug)]
pub enum DetailState {
    Loading,
    Resolved(ResolvedActivity),
    Failed(AppError),
}

impl DetailState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DetailState::Loading)
    }
}

/// Detail record with core fields reconciled against the list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedActivity {
    /// The requested id
    pub id: String,
    /// Empty when neither source had a type
    pub activity_type: String,
    pub duration: Option<f64>,
    pub calories_burned: Option<f64>,
    pub created_at: Option<String>,
    pub recommendation: Option<String>,
    pub improvements: Vec<RecommendationItem>,
    pub suggestions: Vec<RecommendationItem>,
    pub safety: Vec<RecommendationItem>,
    /// Whether a same-id record was found in the list collection
    pub fallback_found: bool,
}

impl ResolvedActivity {
    /// Duration as displayed; empty when missing.
    pub fn duration_display(&self) -> String {
        display_number(self.duration)
    }

    /// Calories as displayed; empty when missing.
    pub fn calories_display(&self) -> String {
        display_number(self.calories_burned)
    }

    pub fn has_recommendation(&self) -> bool {
        self.recommendation.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Resolves detail screens over a repository.
#[derive(Clone)]
pub struct DetailResolver {
    repository: ActivityRepository,
}

impl DetailResolver {
    pub fn new(repository: ActivityRepository) -> Self {
        Self { repository }
    }

    /// Run the flow to a terminal state.
    pub async fn load(&self, id: &str, cancel: &CancellationToken) -> DetailState {
        match self.resolve(id, cancel).await {
            Ok(resolved) => DetailState::Resolved(resolved),
            Err(e) => {
                tracing::warn!(id, error = %e, "Activity detail failed");
                DetailState::Failed(e)
            }
        }
    }

    /// Fetch the detail record and backfill missing core fields.
    pub async fn resolve(&self, id: &str, cancel: &CancellationToken) -> Result<ResolvedActivity> {
        let primary = self.repository.get_activity_detail(id, cancel).await?;

        let fallback = if is_incomplete(&primary) {
            tracing::debug!(id, "Detail record incomplete, looking for fallback");
            self.find_fallback(id, cancel).await?
        } else {
            None
        };

        Ok(resolve_fields(id, primary, fallback.as_ref()))
    }

    /// Best-effort lookup in the cached or freshly listed collection.
    ///
    /// A failed list fetch is logged and yields `None`. Only cancellation
    /// propagates, so a dropped screen does not resolve.
    async fn find_fallback(&self, id: &str, cancel: &CancellationToken) -> Result<Option<Activity>> {
        let collection = match self.repository.cached_activities() {
            Some(cached) => {
                tracing::debug!(id, count = cached.len(), "Using cached activities for fallback");
                cached
            }
            None => match self.repository.list_activities(cancel).await {
                Ok(listed) => listed,
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    tracing::warn!(id, error = %e, "Fallback list fetch failed, continuing without it");
                    return Ok(None);
                }
            },
        };

        let found = find_by_id(&collection, id).cloned();
        if found.is_none() {
            tracing::debug!(id, "No fallback record with matching id");
        }
        Ok(found)
    }
}

/// True when any core field is falsy.
///
/// Zero counts as missing, same as absent or empty. A genuine zero-minute
/// or zero-calorie activity therefore always triggers a fallback lookup.
pub fn is_incomplete(activity: &Activity) -> bool {
    truthy_str(activity.activity_type.as_deref()).is_none()
        || truthy_number(activity.duration).is_none()
        || truthy_number(activity.calories_burned).is_none()
}

/// Find the entry whose id, compared as a string, equals `id`.
pub fn find_by_id<'a>(collection: &'a [Activity], id: &str) -> Option<&'a Activity> {
    collection
        .iter()
        .find(|a| a.id.as_ref().is_some_and(|aid| aid.matches(id)))
}

/// Merge core fields; AI content comes from the primary record only.
pub fn resolve_fields(id: &str, primary: Activity, fallback: Option<&Activity>) -> ResolvedActivity {
    let activity_type = truthy_str(primary.activity_type.as_deref())
        .or_else(|| fallback.and_then(|f| truthy_str(f.activity_type.as_deref())))
        .unwrap_or_default()
        .to_string();

    let duration = truthy_number(primary.duration)
        .or_else(|| fallback.and_then(|f| truthy_number(f.duration)));

    let calories_burned = truthy_number(primary.calories_burned)
        .or_else(|| fallback.and_then(|f| truthy_number(f.calories_burned)));

    ResolvedActivity {
        id: id.to_string(),
        activity_type,
        duration,
        calories_burned,
        created_at: primary.created_at,
        recommendation: primary.recommendation,
        improvements: primary.improvements.unwrap_or_default(),
        suggestions: primary.suggestions.unwrap_or_default(),
        safety: primary.safety.unwrap_or_default(),
        fallback_found: fallback.is_some(),
    }
}

fn truthy_str(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn truthy_number(value: Option<f64>) -> Option<f64> {
    value.filter(|n| *n != 0.0 && !n.is_nan())
}

/// Numbers as displayed: whole numbers without a decimal point, empty when missing.
pub(crate) fn display_number(value: Option<f64>) -> String {
    match value {
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => String::new(),
    }
}
