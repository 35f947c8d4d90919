//! Heuristic argument scoring.
//!
//! Scores are a pure function of the argument text: a base of 5.0 plus
//! additive bonuses for length, evidence vocabulary, logical connectors,
//! examples and specificity. The result is rounded to one decimal place and
//! capped at 10.0, so every score lies in `[5.0, 10.0]`.
//!
//! Length is measured in UTF-16 code units, so a character outside the Basic
//! Multilingual Plane (most emoji) counts twice.
//!
//! Evidence and connector keywords are matched case-insensitively. The
//! example and specificity phrases are matched case-sensitively, so
//! "For example" earns nothing while "for example" does.

use serde::Serialize;

pub const BASE_SCORE: f64 = 5.0;
pub const SCORE_CAP: f64 = 10.0;

const LENGTH_TIERS: [usize; 2] = [200, 400];
const LENGTH_BONUS: f64 = 1.0;

pub const EVIDENCE_KEYWORDS: [&str; 6] = [
    "because",
    "therefore",
    "research",
    "studies",
    "data",
    "evidence",
];
const EVIDENCE_BONUS: f64 = 0.5;

pub const CONNECTOR_KEYWORDS: [&str; 5] = [
    "however",
    "furthermore",
    "moreover",
    "additionally",
    "consequently",
];
const CONNECTOR_BONUS: f64 = 0.3;

const EXAMPLE_PHRASES: [&str; 2] = ["for example", "for instance"];
const EXAMPLE_BONUS: f64 = 0.5;

const SPECIFICITY_PHRASES: [&str; 2] = ["specifically", "particularly"];
const SPECIFICITY_BONUS: f64 = 0.3;

/// Individual contributions that make up a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Length of the scored text in UTF-16 code units.
    pub length: usize,
    pub length_bonus: f64,
    pub evidence_hits: Vec<&'static str>,
    pub connector_hits: Vec<&'static str>,
    pub example_bonus: f64,
    pub specificity_bonus: f64,
    /// Sum before rounding and capping.
    pub raw: f64,
    pub final_score: f64,
}

/// Scores an argument, returning every contribution.
pub fn evaluate(text: &str) -> ScoreBreakdown {
    let length = text.encode_utf16().count();
    let lowered = text.to_lowercase();

    let length_bonus = LENGTH_TIERS
        .iter()
        .filter(|&&tier| length > tier)
        .count() as f64
        * LENGTH_BONUS;

    let evidence_hits: Vec<&'static str> = EVIDENCE_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(keyword))
        .collect();

    let connector_hits: Vec<&'static str> = CONNECTOR_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(keyword))
        .collect();

    let example_bonus = if EXAMPLE_PHRASES.iter().any(|p| text.contains(p)) {
        EXAMPLE_BONUS
    } else {
        0.0
    };

    let specificity_bonus = if SPECIFICITY_PHRASES.iter().any(|p| text.contains(p)) {
        SPECIFICITY_BONUS
    } else {
        0.0
    };

    let raw = BASE_SCORE
        + length_bonus
        + evidence_hits.len() as f64 * EVIDENCE_BONUS
        + connector_hits.len() as f64 * CONNECTOR_BONUS
        + example_bonus
        + specificity_bonus;

    ScoreBreakdown {
        length,
        length_bonus,
        evidence_hits,
        connector_hits,
        example_bonus,
        specificity_bonus,
        raw,
        final_score: round_tenth(raw).min(SCORE_CAP),
    }
}

/// Scores an argument in `[5.0, 10.0]` at 0.1 granularity.
pub fn score(text: &str) -> f64 {
    evaluate(text).final_score
}

/// Rounds to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
