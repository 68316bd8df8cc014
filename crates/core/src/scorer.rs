//! Rule-based assessment scorer.
//!
//! Scoring is a pure function of the text (plus the current time for `created_at`):
//!
//! 1. every lexicon keyword that occurs as a substring of the lower-cased text is matched,
//!    in lexicon order, and its weight added to the raw score;
//! 2. the raw score is multiplied by a length penalty in `[0.5, 1.0]`;
//! 3. the product is rounded to two decimals and mapped onto a [`Label`] band.
//!
//! Matching is not tokenised: `"stress"` matches inside `"stressed"`, `"sad"` inside
//! `"crusade"`.

use crate::constants::{
    HIGH_THRESHOLD, LENGTH_PENALTY_SCALE, MAX_LENGTH_PENALTY, MIN_LENGTH_PENALTY,
    MODERATE_THRESHOLD,
};
use crate::lexicon::Lexicon;
use crate::store::DocumentId;
use chrono::{DateTime, Utc};
use std::fmt;

/// Coarse severity band assigned from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Label {
    Minimal,
    Low,
    Moderate,
    High,
}

impl Label {
    /// Maps a non-negative score onto its band.
    ///
    /// Lower bounds are inclusive: `6.0` is `High`, `3.0` is `Moderate`, any positive score
    /// below that is `Low` and zero is `Minimal`.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Label::High
        } else if score >= MODERATE_THRESHOLD {
            Label::Moderate
        } else if score > 0.0 {
            Label::Low
        } else {
            Label::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Minimal => "Minimal",
            Label::Low => "Low",
            Label::Moderate => "Moderate",
            Label::High => "High",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one piece of text.
///
/// Only `id` changes after construction, and only when the result has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    pub score: f64,
    pub label: Label,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub id: Option<DocumentId>,
}

impl From<AssessmentResult> for api_shared::AssessmentRes {
    fn from(result: AssessmentResult) -> Self {
        api_shared::AssessmentRes {
            score: result.score,
            label: result.label.to_string(),
            keywords: result.keywords,
            created_at: result.created_at,
            id: result.id.map(|id| id.to_string()),
        }
    }
}

/// Damping factor for a text of `char_count` characters.
///
/// `min(1.0, max(0.5, 100 / (char_count + 1)))`: texts under 100 characters are undamped, longer
/// texts are damped down to at most half.
pub fn length_penalty(char_count: usize) -> f64 {
    (LENGTH_PENALTY_SCALE / (char_count as f64 + 1.0))
        .clamp(MIN_LENGTH_PENALTY, MAX_LENGTH_PENALTY)
}

/// Rounds to two decimal places, halves away from zero.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores `text` against the standard lexicon.
///
/// The minimum length is enforced by callers; this function is total over any input.
pub fn score(text: &str) -> AssessmentResult {
    score_with(Lexicon::standard(), text, Utc::now())
}

/// Scores `text` against `lexicon`, stamping the result with `now`.
pub fn score_with(lexicon: &Lexicon, text: &str, now: DateTime<Utc>) -> AssessmentResult {
    let lowered = text.to_lowercase();

    let mut keywords = Vec::new();
    let mut raw = 0.0;
    for entry in lexicon.entries() {
        if lowered.contains(entry.keyword) {
            keywords.push(entry.keyword.to_string());
            raw += entry.weight;
        }
    }

    let penalty = length_penalty(text.chars().count());
    let score = round_2dp(raw * penalty);

    AssessmentResult {
        score,
        label: Label::from_score(score),
        keywords,
        created_at: now,
        id: None,
    }
}
