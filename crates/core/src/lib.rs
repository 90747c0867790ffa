//! # PFMS Core
//!
//! Feedback categorization and clustering engine for the PFMS patient-feedback dashboard.
//!
//! This crate contains pure data operations:
//! - Answer sentiment scoring (ratings, radio options, free text)
//! - Feedback categorization into positive/negative/neutral with reasoning
//! - Per-patient clustering with a majority-vote verdict
//! - Dashboard summaries (feedback types, sentiment breakdown, weekly trend)
//! - Boundary validation of loosely-typed feedback payloads
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest` and `cli`.

pub mod categorizer;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod error;
pub mod record;
pub mod scorer;
pub mod service;
pub mod summary;
pub mod trends;

pub use categorizer::{categorize_feedback, categorize_feedback_with, FeedbackCategory};
pub use cluster::{cluster_user_feedback, cluster_user_feedback_with, UserFeedbackCluster};
pub use config::{scoring_config_from_env_values, CoreConfig, ScoringConfig, ScoringOverrides};
pub use error::{FeedbackError, FeedbackResult};
pub use record::{
    parse_date, parse_feedback_records, parse_feedback_records_lenient, parse_timestamp,
    validate_records, FeedbackRecord, LoadReport, RawFeedbackRecord,
};
pub use scorer::{score_answer, score_answer_text, SentimentResult};
pub use service::FeedbackService;
pub use summary::{
    categorization_summary, filter_by_department, sentiment_breakdown, summarize_feedback_types,
    FeedbackTypeSummary, SentimentBreakdown,
};
pub use trends::{weekly_type_counts, WeeklyTypeCount};

pub use pfms_types::{FeedbackId, FeedbackType, Score, Verdict};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Malformed but structurally acceptable payloads must flow through every operation.
    #[test]
    fn test_engine_is_total_over_malformed_records() {
        let payload = json!([
            {"id": "1", "category": null, "questionAnswer": "", "createdAt": "", "departmentId": 1, "patientId": 1},
            {"id": "2", "category": 42, "questionAnswer": 3.5, "createdAt": "31/12/2024", "departmentId": 1, "patientId": 1},
            {"id": "3", "category": "COMPLAINT", "questionAnswer": {"nested": true}, "createdAt": "2024-13-45", "departmentId": 1, "patientId": -4},
            {"id": "4", "category": "compliment ", "questionAnswer": "   ", "departmentId": 2, "patientId": 0},
            {"id": "5", "category": "SUGGESTION", "questionAnswer": "/5", "createdAt": "2024-01-01", "departmentId": 2, "patientId": 9},
            {"id": "6", "category": "", "questionAnswer": "ünïcödé ÄNSWER ✓", "createdAt": "2024-01-01T00:00:00Z", "departmentId": 2, "patientId": 9},
            {"id": "7", "category": "Compliment", "questionAnswer": "00000000000000000000000000005/5", "createdAt": "2024-02-30", "departmentId": 2, "patientId": 9},
            {"id": "8", "questionAnswer": true, "departmentId": "3", "patientId": "9"}
        ])
        .to_string();

        let records = parse_feedback_records(&payload).expect("all records coerce");
        assert_eq!(records.len(), 8);
        assert_eq!(records[3].category, FeedbackType::Other("compliment ".into()));

        for record in &records {
            let result = score_answer(record);
            assert!((0.0..=1.0).contains(&result.sentiment.get()));
            assert!((0.0..=1.0).contains(&result.confidence.get()));

            let category = categorize_feedback(record);
            assert!(!category.reasoning.is_empty());
            assert!((0.0..=1.0).contains(&category.confidence.get()));
            assert!(!categorization_summary(&category).is_empty());
        }

        let clusters = cluster_user_feedback(&records);
        assert_eq!(clusters.len(), 4);
        let total: usize = clusters.iter().map(|c| c.total_feedbacks).sum();
        assert_eq!(total, records.len());
        for c in &clusters {
            assert_eq!(
                c.positive_count + c.negative_count + c.neutral_count,
                c.feedbacks.len()
            );
        }

        let service = FeedbackService::default();
        assert_eq!(service.type_summary(&records, None).total, 8);
        assert_eq!(service.sentiment_breakdown(&records, Some(2)).total, 4);
    }
}
