//! Answer sentiment scoring.
//!
//! Maps a single answer to a sentiment in `[0, 1]` and a confidence, choosing a strategy from
//! the answer's shape, in order:
//! 1. unanswered → low-confidence neutral
//! 2. numeric rating (`4`, `4/5`) → rating bucket
//! 3. known radio/select option → table score
//! 4. anything else → keyword containment over free text

use crate::constants::{
    EMPTY_ANSWER_CONFIDENCE, KEYWORD_CONFIDENCE, NEGATIVE_KEYWORDS, NEUTRAL_SENTIMENT,
    PHRASE_CONFIDENCE, PHRASE_SENTIMENTS, POSITIVE_KEYWORDS,
};
use crate::FeedbackRecord;
use pfms_types::Score;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static RATING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(?:/5)?$").expect("rating pattern is valid"));

static PHRASE_TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| PHRASE_SENTIMENTS.iter().copied().collect());

/// Sentiment and confidence for a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: Score,
    pub confidence: Score,
}

impl SentimentResult {
    fn new(sentiment: f64, confidence: f64) -> Self {
        Self {
            sentiment: Score::new(sentiment),
            confidence: Score::new(confidence),
        }
    }
}

/// Scores the answer of one feedback record.
pub fn score_answer(record: &FeedbackRecord) -> SentimentResult {
    score_answer_text(record.question_answer.as_deref())
}

/// Scores a raw answer. Total: every input yields a result.
pub fn score_answer_text(answer: Option<&str>) -> SentimentResult {
    let answer = match answer {
        Some(a) if !a.is_empty() => a,
        _ => return SentimentResult::new(NEUTRAL_SENTIMENT, EMPTY_ANSWER_CONFIDENCE),
    };

    let normalised = answer.trim().to_lowercase();

    if let Some(rating) = parse_rating(&normalised) {
        return rating_sentiment(rating);
    }

    if let Some(&sentiment) = PHRASE_TABLE.get(normalised.as_str()) {
        return SentimentResult::new(sentiment, PHRASE_CONFIDENCE);
    }

    SentimentResult::new(keyword_sentiment(answer), KEYWORD_CONFIDENCE)
}

/// Leading integer of a whole-string rating such as `4` or `4/5`.
///
/// Digit runs too large for `u64` saturate, so they still land in the top bucket.
fn parse_rating(normalised: &str) -> Option<u64> {
    let caps = RATING_PATTERN.captures(normalised)?;
    let digits = caps.get(1)?.as_str();
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

fn rating_sentiment(rating: u64) -> SentimentResult {
    match rating {
        0..=2 => SentimentResult::new(0.2, 0.9),
        3 => SentimentResult::new(0.5, 0.8),
        _ => SentimentResult::new(0.8, 0.9),
    }
}

/// Share of matched keywords that are positive, or neutral when nothing matches.
///
/// Each keyword counts once if it appears anywhere in the text, including inside a longer
/// word ("unsatisfied" also contains "satisfied").
pub fn keyword_sentiment(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let positive = POSITIVE_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    let negative = NEGATIVE_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();

    if positive == 0 && negative == 0 {
        return NEUTRAL_SENTIMENT;
    }
    positive as f64 / (positive + negative) as f64
}
