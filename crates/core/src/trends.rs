//! Weekly feedback-type trend.

use crate::constants::MAX_TREND_WEEKS;
use crate::{FeedbackError, FeedbackRecord, FeedbackResult};
use chrono::{Datelike, Duration, NaiveDate};
use pfms_types::FeedbackType;
use serde::Serialize;
use utoipa::ToSchema;

/// Feedback counts by type for one Monday-based week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTypeCount {
    /// Monday of the week, `YYYY-MM-DD`.
    pub week_start: String,
    pub iso_week: u32,
    pub complaints: usize,
    pub suggestions: usize,
    pub compliments: usize,
}

fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Counts feedback by type for every week overlapping `start..=end`.
///
/// Weeks with no feedback are included with zero counts. Only records dated within the range
/// are counted; records with an unparseable `created_at` are ignored.
///
/// # Errors
///
/// Returns `FeedbackError::InvalidInput` if `start` is after `end` or the range spans more
/// than the supported number of weeks.
pub fn weekly_type_counts(
    records: &[FeedbackRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> FeedbackResult<Vec<WeeklyTypeCount>> {
    if start > end {
        return Err(FeedbackError::InvalidInput(format!(
            "start date {start} is after end date {end}"
        )));
    }

    let first_monday = week_monday(start);
    let weeks = (week_monday(end) - first_monday).num_days() / 7 + 1;
    if weeks > MAX_TREND_WEEKS {
        return Err(FeedbackError::InvalidInput(format!(
            "date range spans {weeks} weeks (maximum {MAX_TREND_WEEKS})"
        )));
    }

    let mut rows: Vec<WeeklyTypeCount> = (0..weeks)
        .map(|i| {
            let monday = first_monday + Duration::weeks(i);
            WeeklyTypeCount {
                week_start: monday.format("%Y-%m-%d").to_string(),
                iso_week: monday.iso_week().week(),
                complaints: 0,
                suggestions: 0,
                compliments: 0,
            }
        })
        .collect();

    for record in records {
        let Some(date) = record.created_at_parsed().map(|dt| dt.date_naive()) else {
            continue;
        };
        if date < start || date > end {
            continue;
        }
        let index = ((week_monday(date) - first_monday).num_days() / 7) as usize;
        let Some(row) = rows.get_mut(index) else {
            continue;
        };
        match record.category {
            FeedbackType::Complaint => row.complaints += 1,
            FeedbackType::Suggestion => row.suggestions += 1,
            FeedbackType::Compliment => row.compliments += 1,
            FeedbackType::Other(_) => {}
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::record;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_weekly_counts_bucket_by_monday() {
        // 2024-01-01 is a Monday.
        let records = vec![
            record("1", "COMPLAINT", None, "2024-01-01T08:00:00Z", 1),
            record("2", "COMPLIMENT", None, "2024-01-07T23:00:00Z", 1),
            record("3", "SUGGESTION", None, "2024-01-08", 2),
            record("4", "COMPLAINT", None, "2024-01-17", 3),
            record("5", "other", None, "2024-01-10", 3),
            record("6", "COMPLAINT", None, "invalid", 3),
            record("7", "COMPLAINT", None, "2023-12-31", 3),
        ];

        let rows = weekly_type_counts(&records, date(2024, 1, 1), date(2024, 1, 21))
            .expect("valid range");
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].week_start, "2024-01-01");
        assert_eq!(rows[0].iso_week, 1);
        assert_eq!((rows[0].complaints, rows[0].suggestions, rows[0].compliments), (1, 0, 1));

        assert_eq!(rows[1].week_start, "2024-01-08");
        assert_eq!((rows[1].complaints, rows[1].suggestions, rows[1].compliments), (0, 1, 0));

        assert_eq!(rows[2].iso_week, 3);
        assert_eq!((rows[2].complaints, rows[2].suggestions, rows[2].compliments), (1, 0, 0));
    }

    #[test]
    fn test_range_starting_midweek_includes_partial_week() {
        let rows = weekly_type_counts(&[], date(2024, 1, 3), date(2024, 1, 3)).expect("valid");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].week_start, "2024-01-01");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = weekly_type_counts(&[], date(2024, 2, 1), date(2024, 1, 1))
            .expect_err("should reject");
        assert!(matches!(err, FeedbackError::InvalidInput(msg) if msg.contains("after end")));
    }

    #[test]
    fn test_excessive_range_is_rejected() {
        let err = weekly_type_counts(&[], date(1990, 1, 1), date(2024, 1, 1))
            .expect_err("should reject");
        assert!(matches!(err, FeedbackError::InvalidInput(msg) if msg.contains("maximum")));
    }
}
