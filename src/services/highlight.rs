// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Randomized presentation aids for the detail screen.
//!
//! Kept apart from detail resolution: these outputs change between runs on
//! the same data, and nothing downstream depends on them.

use crate::models::RecommendationItem;
use ring::rand::{SecureRandom, SystemRandom};

/// Radar chart axes for the suggested workout split.
pub const SPLIT_CATEGORIES: [&str; 5] = ["Cardio", "Strength", "Flexibility", "Balance", "Mobility"];

/// Scores shown when there are no suggestions.
pub const DEFAULT_SPLIT_SCORES: [u8; 5] = [3, 2, 4, 1, 2];

/// Highest radar score.
pub const MAX_SPLIT_SCORE: u8 = 5;

/// Source of uniformly distributed indices.
pub trait IndexSource {
    /// Return an index in `0..upper`. `upper` is never zero.
    fn next_below(&mut self, upper: usize) -> usize;
}

/// Index source backed by the OS CSPRNG.
pub struct SystemIndexSource {
    rng: SystemRandom,
}

impl SystemIndexSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for SystemIndexSource {
    fn next_below(&mut self, upper: usize) -> usize {
        let mut buf = [0u8; 8];
        if self.rng.fill(&mut buf).is_err() {
            tracing::warn!("System RNG unavailable, using first index");
            return 0;
        }
        (u64::from_le_bytes(buf) % upper as u64) as usize
    }
}

/// Radar chart data for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSplit {
    pub labels: [&'static str; 5],
    pub scores: [u8; 5],
}

/// Pick one suggestion uniformly at random.
pub fn pick_suggestion<'a, R>(
    suggestions: &'a [RecommendationItem],
    rng: &mut R,
) -> Option<&'a RecommendationItem>
where
    R: IndexSource + ?Sized,
{
    if suggestions.is_empty() {
        return None;
    }
    suggestions.get(rng.next_below(suggestions.len()))
}

/// Build the workout split chart.
///
/// Suggestions are free text, so with suggestions present each axis gets a
/// random score in `0..=5`; without them the chart shows fixed scores.
pub fn workout_split<R>(suggestions: &[RecommendationItem], rng: &mut R) -> WorkoutSplit
where
    R: IndexSource + ?Sized,
{
    let scores = if suggestions.is_empty() {
        DEFAULT_SPLIT_SCORES
    } else {
        SPLIT_CATEGORIES.map(|_| rng.next_below(MAX_SPLIT_SCORE as usize + 1) as u8)
    };

    WorkoutSplit {
        labels: SPLIT_CATEGORIES,
        scores,
    }
}
