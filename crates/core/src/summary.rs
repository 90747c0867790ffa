//! Summaries over categorized feedback for dashboard display.

use crate::categorizer::{categorize_feedback_with, FeedbackCategory};
use crate::config::ScoringConfig;
use crate::FeedbackRecord;
use pfms_types::{FeedbackType, Verdict};
use serde::Serialize;
use utoipa::ToSchema;

/// Renders a one-line description of a categorization, e.g.
/// `Positive feedback (84% confidence)`.
pub fn categorization_summary(category: &FeedbackCategory) -> String {
    let confidence_percent = (category.confidence.get() * 100.0).round() as i64;

    match category.overall {
        Verdict::Positive => format!("Positive feedback ({confidence_percent}% confidence)"),
        Verdict::Negative => format!("Negative feedback ({confidence_percent}% confidence)"),
        Verdict::Neutral => format!("Neutral feedback ({confidence_percent}% confidence)"),
        Verdict::Unrecognised => "Unable to categorize feedback".to_string(),
    }
}

/// Keeps only the records submitted to one department, preserving order.
pub fn filter_by_department(records: &[FeedbackRecord], department_id: i64) -> Vec<FeedbackRecord> {
    records
        .iter()
        .filter(|r| r.department_id == department_id)
        .cloned()
        .collect()
}

/// Counts of feedback by declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackTypeSummary {
    pub total: usize,
    pub complaints: usize,
    pub suggestions: usize,
    pub compliments: usize,
    /// Records whose type was missing or unrecognised.
    pub other: usize,
}

pub fn summarize_feedback_types(records: &[FeedbackRecord]) -> FeedbackTypeSummary {
    let mut summary = FeedbackTypeSummary {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match record.category {
            FeedbackType::Complaint => summary.complaints += 1,
            FeedbackType::Suggestion => summary.suggestions += 1,
            FeedbackType::Compliment => summary.compliments += 1,
            FeedbackType::Other(_) => summary.other += 1,
        }
    }
    summary
}

/// Distribution of per-record verdicts, with percentages for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
    pub positive_percent: f64,
    pub negative_percent: f64,
    pub neutral_percent: f64,
}

/// Categorizes every record and tallies the verdicts.
///
/// Percentages are all zero when there are no records.
pub fn sentiment_breakdown(records: &[FeedbackRecord], cfg: &ScoringConfig) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match categorize_feedback_with(record, cfg).overall {
            Verdict::Positive => breakdown.positive += 1,
            Verdict::Negative => breakdown.negative += 1,
            _ => breakdown.neutral += 1,
        }
    }

    if breakdown.total > 0 {
        let total = breakdown.total as f64;
        breakdown.positive_percent = breakdown.positive as f64 / total * 100.0;
        breakdown.negative_percent = breakdown.negative as f64 / total * 100.0;
        breakdown.neutral_percent = breakdown.neutral as f64 / total * 100.0;
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::record;
    use pfms_types::Score;

    fn category(overall: Verdict, confidence: f64) -> FeedbackCategory {
        FeedbackCategory {
            overall,
            confidence: Score::new(confidence),
            reasoning: vec!["test".into()],
        }
    }

    #[test]
    fn test_categorization_summary_rounds_confidence() {
        assert_eq!(
            categorization_summary(&category(Verdict::Positive, 0.84)),
            "Positive feedback (84% confidence)"
        );
        assert_eq!(
            categorization_summary(&category(Verdict::Negative, 0.666)),
            "Negative feedback (67% confidence)"
        );
        assert_eq!(
            categorization_summary(&category(Verdict::Neutral, 0.125)),
            "Neutral feedback (13% confidence)"
        );
    }

    #[test]
    fn test_categorization_summary_for_unknown_verdict() {
        let parsed: FeedbackCategory = serde_json::from_value(serde_json::json!({
            "overall": "mixed",
            "confidence": 0.5,
            "reasoning": []
        }))
        .expect("should deserialize");
        assert_eq!(categorization_summary(&parsed), "Unable to categorize feedback");
    }

    #[test]
    fn test_filter_by_department() {
        let mut other = record("b", "COMPLAINT", None, "2024-01-01", 1);
        other.department_id = 2;
        let records = vec![
            record("a", "COMPLAINT", None, "2024-01-01", 1),
            other,
            record("c", "COMPLIMENT", None, "2024-01-02", 2),
        ];

        let filtered = filter_by_department(&records, 1);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(filter_by_department(&records, 9).is_empty());
    }

    #[test]
    fn test_summarize_feedback_types() {
        let records = vec![
            record("1", "COMPLAINT", None, "", 1),
            record("2", "complaint", None, "", 1),
            record("3", "Suggestion", None, "", 1),
            record("4", "COMPLIMENT", None, "", 1),
            record("5", "question", None, "", 1),
        ];

        assert_eq!(
            summarize_feedback_types(&records),
            FeedbackTypeSummary {
                total: 5,
                complaints: 2,
                suggestions: 1,
                compliments: 1,
                other: 1,
            }
        );
    }

    #[test]
    fn test_sentiment_breakdown_percentages() {
        let records = vec![
            record("1", "COMPLIMENT", Some("5"), "", 1),
            record("2", "COMPLIMENT", Some("very good"), "", 2),
            record("3", "COMPLAINT", Some("1"), "", 3),
            record("4", "other", Some("3"), "", 4),
        ];

        let b = sentiment_breakdown(&records, &ScoringConfig::default());
        assert_eq!((b.positive, b.negative, b.neutral, b.total), (2, 1, 1, 4));
        assert_eq!(b.positive_percent, 50.0);
        assert_eq!(b.negative_percent, 25.0);
        assert_eq!(b.neutral_percent, 25.0);
    }

    #[test]
    fn test_sentiment_breakdown_of_nothing_is_zeroed() {
        let b = sentiment_breakdown(&[], &ScoringConfig::default());
        assert_eq!(b, SentimentBreakdown::default());
    }
}
