// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model as exchanged with the fitness API.
//!
//! The list and detail endpoints are served by different backends, so the
//! response model is deliberately lenient: ids may arrive as strings or
//! numbers and the numeric fields may arrive as numbers, numeric strings,
//! empty strings or null.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Workout category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    Swimming,
    Yoga,
    StrengthTraining,
    Hiking,
    Rowing,
    Dancing,
    Pilates,
}

impl ActivityType {
    pub const ALL: [ActivityType; 10] = [
        ActivityType::Running,
        ActivityType::Walking,
        ActivityType::Cycling,
        ActivityType::Swimming,
        ActivityType::Yoga,
        ActivityType::StrengthTraining,
        ActivityType::Hiking,
        ActivityType::Rowing,
        ActivityType::Dancing,
        ActivityType::Pilates,
    ];

    /// Wire name, e.g. `STRENGTH_TRAINING`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Running => "RUNNING",
            ActivityType::Walking => "WALKING",
            ActivityType::Cycling => "CYCLING",
            ActivityType::Swimming => "SWIMMING",
            ActivityType::Yoga => "YOGA",
            ActivityType::StrengthTraining => "STRENGTH_TRAINING",
            ActivityType::Hiking => "HIKING",
            ActivityType::Rowing => "ROWING",
            ActivityType::Dancing => "DANCING",
            ActivityType::Pilates => "PILATES",
        }
    }

    /// Human label, e.g. `Strength Training`.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Walking => "Walking",
            ActivityType::Cycling => "Cycling",
            ActivityType::Swimming => "Swimming",
            ActivityType::Yoga => "Yoga",
            ActivityType::StrengthTraining => "Strength Training",
            ActivityType::Hiking => "Hiking",
            ActivityType::Rowing => "Rowing",
            ActivityType::Dancing => "Dancing",
            ActivityType::Pilates => "Pilates",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known activity type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity type: {0}")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    /// Accepts `STRENGTH_TRAINING`, `strength-training` and `Strength Training`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

/// Server-assigned activity identifier.
///
/// Equality and hashing go through the string form, so `7` and `"7"`
/// identify the same activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityId {
    Text(String),
    Number(serde_json::Number),
}

impl ActivityId {
    pub fn as_key(&self) -> String {
        self.to_string()
    }

    /// Compare against a raw id, e.g. a route parameter.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            ActivityId::Text(s) => s == raw,
            ActivityId::Number(n) => n.to_string() == raw,
        }
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityId::Text(s) => f.write_str(s),
            ActivityId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl PartialEq for ActivityId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for ActivityId {}

impl Hash for ActivityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl From<&str> for ActivityId {
    fn from(s: &str) -> Self {
        ActivityId::Text(s.to_string())
    }
}

impl From<String> for ActivityId {
    fn from(s: String) -> Self {
        ActivityId::Text(s)
    }
}

impl From<u64> for ActivityId {
    fn from(n: u64) -> Self {
        ActivityId::Number(n.into())
    }
}

/// One entry of `improvements`, `suggestions` or `safety`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendationItem {
    Text(String),
    Structured(StructuredItem),
}

/// Structured recommendation entry. Only `area` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RecommendationItem {
    /// Text shown for this entry: the text itself, the `area`, or the raw JSON.
    pub fn display_text(&self) -> String {
        match self {
            RecommendationItem::Text(text) => text.clone(),
            RecommendationItem::Structured(item) => match item.area.as_deref() {
                Some(area) if !area.is_empty() => area.to_string(),
                _ => serde_json::to_string(item).unwrap_or_default(),
            },
        }
    }
}

/// Activity record as returned by the list and detail endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: Option<ActivityId>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Raw type string; may be empty or unknown on partial detail records
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    /// Duration in minutes
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories_burned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_metrics: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    // ─── AI recommendation (detail endpoint only) ────────────────
    /// Free-text analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<Vec<RecommendationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<RecommendationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<Vec<RecommendationItem>>,
}

impl Activity {
    /// Parsed type, if the raw string names a known category.
    pub fn parsed_type(&self) -> Option<ActivityType> {
        self.activity_type.as_deref()?.parse().ok()
    }
}

/// Request body for creating an activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Duration in minutes
    pub duration: u32,
    pub calories_burned: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub additional_metrics: serde_json::Map<String, serde_json::Value>,
}

impl NewActivity {
    pub fn new(activity_type: ActivityType, duration: u32, calories_burned: u32) -> Self {
        Self {
            activity_type,
            duration,
            calories_burned,
            start_time: None,
            additional_metrics: serde_json::Map::new(),
        }
    }
}

/// Accept a number, a numeric string, an empty string or null.
///
/// Strings that do not parse as numbers are treated as absent. A numeric
/// string keeps only its value, so `"0"` reads as zero and counts as missing
/// during detail resolution, and `"n/a"` is dropped rather than displayed.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
