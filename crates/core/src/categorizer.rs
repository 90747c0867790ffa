//! Single-feedback categorization.
//!
//! Combines the feedback type a patient declared with the scored answer into one verdict.

use crate::config::ScoringConfig;
use crate::constants::{
    COMPLAINT_SENTIMENT, COMPLIMENT_SENTIMENT, INSUFFICIENT_DATA_REASON,
    NEGATIVE_RESPONSE_CUTOFF, POSITIVE_RESPONSE_CUTOFF, SUGGESTION_SENTIMENT,
    UNKNOWN_CATEGORY_SENTIMENT,
};
use crate::scorer::score_answer;
use crate::FeedbackRecord;
use pfms_types::{FeedbackType, Score, Verdict};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Verdict, confidence and human-readable reasoning for a feedback or a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackCategory {
    #[schema(value_type = String, example = "positive")]
    pub overall: Verdict,
    #[schema(value_type = f64)]
    pub confidence: Score,
    /// Never empty.
    pub reasoning: Vec<String>,
}

/// Categorizes one feedback record with the default scoring configuration.
pub fn categorize_feedback(record: &FeedbackRecord) -> FeedbackCategory {
    categorize_feedback_with(record, &ScoringConfig::default())
}

/// Categorizes one feedback record.
///
/// The declared type and the answer sentiment are blended by the configured weights; the
/// answer's confidence is boosted because the declared type corroborates it.
pub fn categorize_feedback_with(record: &FeedbackRecord, cfg: &ScoringConfig) -> FeedbackCategory {
    let mut reasoning = Vec::new();

    let category_sentiment = match record.category {
        FeedbackType::Compliment => COMPLIMENT_SENTIMENT,
        FeedbackType::Complaint => COMPLAINT_SENTIMENT,
        FeedbackType::Suggestion => SUGGESTION_SENTIMENT,
        FeedbackType::Other(_) => UNKNOWN_CATEGORY_SENTIMENT,
    };
    if let Some(label) = record.category.label() {
        reasoning.push(format!("User selected {label} as feedback type"));
    }

    let answer = score_answer(record);
    let answer_sentiment = answer.sentiment.get();

    let overall_sentiment =
        category_sentiment * cfg.category_weight() + answer_sentiment * cfg.answer_weight();
    let confidence = (answer.confidence.get() + cfg.confidence_boost()).min(1.0);

    let answer_text = record.question_answer.as_deref().unwrap_or_default();
    if answer_sentiment > POSITIVE_RESPONSE_CUTOFF {
        reasoning.push(format!("Positive response: \"{answer_text}\""));
    } else if answer_sentiment < NEGATIVE_RESPONSE_CUTOFF {
        reasoning.push(format!("Negative response: \"{answer_text}\""));
    }

    if reasoning.is_empty() {
        reasoning.push(INSUFFICIENT_DATA_REASON.to_string());
    }

    FeedbackCategory {
        overall: verdict_for(overall_sentiment, cfg),
        confidence: Score::new(confidence),
        reasoning,
    }
}

/// Thresholds are inclusive on both named buckets; only the open interval between is neutral.
fn verdict_for(sentiment: f64, cfg: &ScoringConfig) -> Verdict {
    if sentiment >= cfg.positive_threshold() {
        Verdict::Positive
    } else if sentiment <= cfg.negative_threshold() {
        Verdict::Negative
    } else {
        Verdict::Neutral
    }
}
