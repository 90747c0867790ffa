//! Per-patient feedback clustering.
//!
//! Groups feedback by patient, categorizes every record and reduces each patient's group to a
//! single verdict by strict majority vote.

use crate::categorizer::{categorize_feedback_with, FeedbackCategory};
use crate::config::ScoringConfig;
use crate::FeedbackRecord;
use chrono::{DateTime, Utc};
use pfms_types::{Score, Verdict};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// All feedback from one patient, reduced to one verdict.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedbackCluster {
    pub patient_id: i64,
    /// Newest first.
    pub feedbacks: Vec<FeedbackRecord>,
    pub overall_category: FeedbackCategory,
    pub total_feedbacks: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    /// `created_at` of the newest feedback, empty if the cluster has none.
    pub last_feedback_date: String,
}

/// Clusters feedback by patient with the default scoring configuration.
pub fn cluster_user_feedback(records: &[FeedbackRecord]) -> Vec<UserFeedbackCluster> {
    cluster_user_feedback_with(records, &ScoringConfig::default())
}

/// Clusters feedback by patient.
///
/// Records are grouped by `patient_id`; each group is sorted newest-first and every record is
/// categorized afresh. The resulting clusters are ordered by their newest feedback, most
/// recent first. Unparseable timestamps sort after every valid one, and all sorts are stable.
pub fn cluster_user_feedback_with(
    records: &[FeedbackRecord],
    cfg: &ScoringConfig,
) -> Vec<UserFeedbackCluster> {
    let mut groups: BTreeMap<i64, Vec<&FeedbackRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.patient_id).or_default().push(record);
    }

    let mut clusters: Vec<(Option<DateTime<Utc>>, UserFeedbackCluster)> = groups
        .into_iter()
        .map(|(patient_id, group)| {
            let cluster = build_cluster(patient_id, group, cfg);
            let newest = cluster
                .feedbacks
                .first()
                .and_then(FeedbackRecord::created_at_parsed);
            (newest, cluster)
        })
        .collect();

    clusters.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::debug!(
        "clustered {} feedbacks into {} patient clusters",
        records.len(),
        clusters.len()
    );

    clusters.into_iter().map(|(_, cluster)| cluster).collect()
}

fn build_cluster(
    patient_id: i64,
    group: Vec<&FeedbackRecord>,
    cfg: &ScoringConfig,
) -> UserFeedbackCluster {
    let mut dated: Vec<(Option<DateTime<Utc>>, &FeedbackRecord)> = group
        .into_iter()
        .map(|r| (r.created_at_parsed(), r))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let feedbacks: Vec<FeedbackRecord> = dated.into_iter().map(|(_, r)| r.clone()).collect();

    let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
    for record in &feedbacks {
        match categorize_feedback_with(record, cfg).overall {
            Verdict::Positive => positive += 1,
            Verdict::Negative => negative += 1,
            _ => neutral += 1,
        }
    }

    let total = feedbacks.len();
    let confidence = if total > 0 {
        positive.max(negative).max(neutral) as f64 / total as f64
    } else {
        0.0
    };

    let last_feedback_date = feedbacks
        .first()
        .map(|r| r.created_at.clone())
        .unwrap_or_default();

    UserFeedbackCluster {
        patient_id,
        overall_category: FeedbackCategory {
            overall: majority_verdict(positive, negative, neutral),
            confidence: Score::new(confidence),
            reasoning: vec![format!(
                "{positive} positive, {negative} negative, {neutral} neutral feedbacks"
            )],
        },
        total_feedbacks: total,
        positive_count: positive,
        negative_count: negative,
        neutral_count: neutral,
        last_feedback_date,
        feedbacks,
    }
}

/// A verdict wins only with a count strictly greater than both others; ties are neutral.
pub fn majority_verdict(positive: usize, negative: usize, neutral: usize) -> Verdict {
    if positive > negative && positive > neutral {
        Verdict::Positive
    } else if negative > positive && negative > neutral {
        Verdict::Negative
    } else {
        Verdict::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::record;

    fn ids(cluster: &UserFeedbackCluster) -> Vec<&str> {
        cluster.feedbacks.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_clusters() {
        assert!(cluster_user_feedback(&[]).is_empty());
    }

    #[test]
    fn test_majority_positive_cluster() {
        let records = vec![
            record("a", "COMPLIMENT", Some("5"), "2024-01-01T09:00:00Z", 7),
            record("b", "COMPLIMENT", Some("Excellent"), "2024-01-02T09:00:00Z", 7),
            record("c", "COMPLAINT", Some("1"), "2024-01-03T09:00:00Z", 7),
        ];

        let clusters = cluster_user_feedback(&records);
        assert_eq!(clusters.len(), 1);
        let c = &clusters[0];
        assert_eq!(c.overall_category.overall, Verdict::Positive);
        assert!((c.overall_category.confidence.get() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            c.overall_category.reasoning,
            vec!["2 positive, 1 negative, 0 neutral feedbacks".to_string()]
        );
        assert_eq!(ids(c), vec!["c", "b", "a"]);
        assert_eq!(c.last_feedback_date, "2024-01-03T09:00:00Z");
    }

    #[test]
    fn test_tie_resolves_to_neutral() {
        let records = vec![
            record("a", "COMPLIMENT", Some("5"), "2024-01-01", 3),
            record("b", "COMPLAINT", Some("1"), "2024-01-02", 3),
        ];

        let c = &cluster_user_feedback(&records)[0];
        assert_eq!(c.overall_category.overall, Verdict::Neutral);
        assert_eq!(c.overall_category.confidence.get(), 0.5);
    }

    #[test]
    fn test_majority_verdict_requires_strict_lead() {
        assert_eq!(majority_verdict(2, 1, 0), Verdict::Positive);
        assert_eq!(majority_verdict(0, 3, 2), Verdict::Negative);
        assert_eq!(majority_verdict(2, 2, 1), Verdict::Neutral);
        assert_eq!(majority_verdict(1, 1, 1), Verdict::Neutral);
        assert_eq!(majority_verdict(0, 0, 0), Verdict::Neutral);
        assert_eq!(majority_verdict(0, 0, 4), Verdict::Neutral);
    }

    #[test]
    fn test_clusters_ordered_by_latest_feedback() {
        let records = vec![
            record("a1", "COMPLIMENT", Some("5"), "2024-01-01", 1),
            record("b1", "COMPLIMENT", Some("5"), "2024-01-05", 2),
            record("a2", "COMPLIMENT", Some("5"), "2024-01-03", 1),
        ];

        let clusters = cluster_user_feedback(&records);
        let order: Vec<i64> = clusters.iter().map(|c| c.patient_id).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(clusters[1].last_feedback_date, "2024-01-03");
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let records = vec![
            record("first", "COMPLIMENT", Some("5"), "2024-01-01", 1),
            record("second", "COMPLAINT", Some("1"), "2024-01-01", 1),
            record("third", "SUGGESTION", None, "2024-01-01", 1),
        ];

        let c = &cluster_user_feedback(&records)[0];
        assert_eq!(ids(c), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last_without_panicking() {
        let records = vec![
            record("bad1", "COMPLIMENT", Some("5"), "not a date", 1),
            record("good", "COMPLIMENT", Some("5"), "2024-01-01", 1),
            record("bad2", "COMPLIMENT", Some("5"), "", 1),
            record("only-bad", "COMPLAINT", Some("1"), "???", 2),
        ];

        let clusters = cluster_user_feedback(&records);
        assert_eq!(clusters[0].patient_id, 1);
        assert_eq!(ids(&clusters[0]), vec!["good", "bad1", "bad2"]);
        assert_eq!(clusters[1].last_feedback_date, "???");
    }

    #[test]
    fn test_counts_sum_to_total() {
        let records = vec![
            record("1", "COMPLIMENT", Some("5"), "2024-01-01", 1),
            record("2", "COMPLAINT", Some("terrible"), "2024-01-02", 1),
            record("3", "other", Some("3"), "2024-01-03", 1),
            record("4", "SUGGESTION", Some("okay"), "2024-01-04", 2),
            record("5", "", None, "bogus", 3),
        ];

        for c in cluster_user_feedback(&records) {
            assert!(c.total_feedbacks >= 1);
            assert_eq!(
                c.positive_count + c.negative_count + c.neutral_count,
                c.total_feedbacks
            );
            assert_eq!(c.total_feedbacks, c.feedbacks.len());
        }
    }

    #[test]
    fn test_clustering_is_idempotent_and_leaves_input_untouched() {
        let records = vec![
            record("1", "COMPLIMENT", Some("5"), "2024-01-02", 1),
            record("2", "COMPLAINT", Some("1"), "2024-01-01", 1),
            record("3", "SUGGESTION", Some("good"), "2024-01-03", 2),
        ];
        let snapshot = records.clone();

        let first = cluster_user_feedback(&records);
        let second = cluster_user_feedback(&records);
        assert_eq!(first, second);
        assert_eq!(records, snapshot);
    }
}
