// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of the list, form result and detail screens.

use crate::models::{Activity, ActivityType, RecommendationItem};
use crate::services::detail::{display_number, DetailState, ResolvedActivity};
use crate::services::highlight::{pick_suggestion, workout_split, IndexSource, MAX_SPLIT_SCORE};
use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt::Write as _;

/// Render the activity list.
pub fn render_list(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return "No activities yet.\n".to_string();
    }

    let mut out = String::new();
    for activity in activities {
        let id = activity.id.as_ref().map(|id| id.as_key()).unwrap_or_default();
        let _ = writeln!(out, "[{}] {}", id, type_label(activity.activity_type.as_deref()));
        let _ = writeln!(out, "    Duration: {} minutes", display_number(activity.duration));
        let _ = writeln!(out, "    Calories: {}", display_number(activity.calories_burned));
    }
    out
}

/// Confirmation shown after the form is submitted.
pub fn render_created(activity: &Activity) -> String {
    let id = activity.id.as_ref().map(|id| id.as_key()).unwrap_or_default();
    format!(
        "Added {} ({} minutes, {} calories) as activity {}\n",
        type_label(activity.activity_type.as_deref()),
        display_number(activity.duration),
        display_number(activity.calories_burned),
        id
    )
}

/// Render the detail screen for any state.
pub fn render_detail_state<R>(state: &DetailState, rng: &mut R) -> String
where
    R: IndexSource + ?Sized,
{
    match state {
        DetailState::Loading => "...Loading\n".to_string(),
        DetailState::Resolved(resolved) => render_detail(resolved, rng),
        DetailState::Failed(e) => format!("Could not load activity: {}\n", e),
    }
}

/// Render a resolved activity with its recommendation.
pub fn render_detail<R>(activity: &ResolvedActivity, rng: &mut R) -> String
where
    R: IndexSource + ?Sized,
{
    let mut out = String::new();

    let _ = writeln!(out, "Activity Details");
    let _ = writeln!(out, "  Type: {}", type_label(Some(activity.activity_type.as_str())));
    let _ = writeln!(out, "  Duration: {} minutes", activity.duration_display());
    let _ = writeln!(out, "  Calories Burned: {}", activity.calories_display());
    let _ = writeln!(out, "  Date: {}", format_date(activity.created_at.as_deref()));

    let _ = writeln!(out, "\nSuggested Workout Split");
    if let Some(suggestion) = pick_suggestion(&activity.suggestions, rng) {
        let _ = writeln!(out, "  Suggestion: {}", suggestion.display_text());
    }
    let split = workout_split(&activity.suggestions, rng);
    for (label, score) in split.labels.iter().zip(split.scores) {
        let bar = "#".repeat(score as usize);
        let _ = writeln!(
            out,
            "  {:<12}{:<width$} {}",
            label,
            bar,
            score,
            width = MAX_SPLIT_SCORE as usize
        );
    }

    if activity.has_recommendation() {
        let _ = writeln!(out, "\nAI Recommendation");
        let _ = writeln!(out, "  Analysis");
        let _ = writeln!(out, "    {}", activity.recommendation.as_deref().unwrap_or_default());
        section(&mut out, "Improvements", &activity.improvements);
        section(&mut out, "Suggestions", &activity.suggestions);
        section(&mut out, "Safety Guidelines", &activity.safety);
    }

    out
}

fn section(out: &mut String, title: &str, items: &[RecommendationItem]) {
    let _ = writeln!(out, "  {}", title);
    for item in items {
        let _ = writeln!(out, "    • {}", item.display_text());
    }
}

/// Human label for a raw type string; unknown strings pass through.
fn type_label(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => raw
            .parse::<ActivityType>()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => String::new(),
    }
}

/// Format a server timestamp in local time; unparseable values pass through.
fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    // Server-local timestamps without an offset
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
