//! Feedback records and boundary validation.
//!
//! Feedback arrives as loosely-typed JSON from the dashboard backend. [`RawFeedbackRecord`]
//! mirrors that payload; converting it into a [`FeedbackRecord`] coerces the fields the
//! backend is known to send in more than one shape and rejects the rest.

use crate::{FeedbackError, FeedbackResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pfms_types::{FeedbackId, FeedbackType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One validated feedback answer submitted by a patient.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    #[schema(value_type = String)]
    pub id: FeedbackId,
    #[schema(value_type = String, example = "COMPLIMENT")]
    pub category: FeedbackType,
    pub question: String,
    /// `None` when the patient left the question unanswered.
    pub question_answer: Option<String>,
    /// ISO-8601 timestamp, kept verbatim.
    pub created_at: String,
    pub department_id: i64,
    pub patient_id: i64,
}

impl FeedbackRecord {
    /// Parsed `created_at`, or `None` if it is not a recognisable timestamp.
    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Feedback record exactly as received, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedbackRecord {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub category: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub question: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub question_answer: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub department_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub patient_id: Option<Value>,
}

impl TryFrom<RawFeedbackRecord> for FeedbackRecord {
    type Error = FeedbackError;

    fn try_from(raw: RawFeedbackRecord) -> FeedbackResult<Self> {
        let id = match raw.id {
            Some(Value::String(s)) => FeedbackId::new(s)
                .map_err(|e| FeedbackError::InvalidInput(format!("id: {e}")))?,
            Some(Value::Number(n)) => FeedbackId::new(n.to_string())
                .map_err(|e| FeedbackError::InvalidInput(format!("id: {e}")))?,
            Some(Value::Null) | None => {
                return Err(FeedbackError::InvalidInput("id is required".into()))
            }
            Some(_) => {
                return Err(FeedbackError::InvalidInput(
                    "id must be a string or number".into(),
                ))
            }
        };

        let category = match raw.category {
            Some(Value::String(s)) => FeedbackType::parse(&s),
            _ => FeedbackType::Other(String::new()),
        };

        let question = match raw.question {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        // Non-scalar answers are treated as unanswered rather than rejected.
        let question_answer = match raw.question_answer {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Ok(Self {
            id,
            category,
            question,
            question_answer,
            created_at: raw.created_at.unwrap_or_default(),
            department_id: coerce_integer("departmentId", raw.department_id)?,
            patient_id: coerce_integer("patientId", raw.patient_id)?,
        })
    }
}

fn coerce_integer(field: &str, value: Option<Value>) -> FeedbackResult<i64> {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(FeedbackError::InvalidInput(format!(
                    "{field} must be an integer (got {n})"
                ))),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            FeedbackError::InvalidInput(format!("{field} must be an integer (got {s:?})"))
        }),
        Some(Value::Null) | None => Err(FeedbackError::InvalidInput(format!(
            "{field} is required"
        ))),
        Some(other) => Err(FeedbackError::InvalidInput(format!(
            "{field} must be an integer (got {other})"
        ))),
    }
}

/// Parses a feedback timestamp.
///
/// Accepts RFC 3339, zone-less ISO date-times (read as UTC) and bare `YYYY-MM-DD` dates
/// (UTC midnight).
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses a calendar date given as `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> FeedbackResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| FeedbackError::InvalidTimestamp(input.to_string()))
}

/// Outcome of a lenient load: the records that validated and how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<FeedbackRecord>,
    pub skipped: usize,
}

fn parse_array(json: &str) -> FeedbackResult<Vec<Value>> {
    serde_json::from_str::<Vec<Value>>(json).map_err(FeedbackError::Deserialization)
}

fn validate_value(value: Value) -> FeedbackResult<FeedbackRecord> {
    let raw: RawFeedbackRecord =
        serde_json::from_value(value).map_err(|e| FeedbackError::InvalidInput(e.to_string()))?;
    FeedbackRecord::try_from(raw)
}

/// Validates a batch of raw records, failing on the first malformed one.
pub fn validate_records(raw: Vec<RawFeedbackRecord>) -> FeedbackResult<Vec<FeedbackRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, r)| {
            FeedbackRecord::try_from(r).map_err(|e| FeedbackError::InvalidRecord {
                index,
                reason: reason_of(e),
            })
        })
        .collect()
}

/// Parses a JSON array of feedback records, failing on the first malformed record.
///
/// # Errors
///
/// Returns `FeedbackError::Deserialization` if the payload is not a JSON array, or
/// `FeedbackError::InvalidRecord` naming the index of the first record that fails validation.
pub fn parse_feedback_records(json: &str) -> FeedbackResult<Vec<FeedbackRecord>> {
    parse_array(json)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            validate_value(value).map_err(|e| FeedbackError::InvalidRecord {
                index,
                reason: reason_of(e),
            })
        })
        .collect()
}

/// Parses a JSON array of feedback records, skipping malformed records.
///
/// Each skipped record is logged as a warning. Only a payload that is not a JSON array at all
/// is an error.
pub fn parse_feedback_records_lenient(json: &str) -> FeedbackResult<LoadReport> {
    let mut report = LoadReport::default();
    for (index, value) in parse_array(json)?.into_iter().enumerate() {
        match validate_value(value) {
            Ok(record) => report.records.push(record),
            Err(e) => {
                tracing::warn!("skipping feedback record {}: {}", index, reason_of(e));
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

fn reason_of(err: FeedbackError) -> String {
    match err {
        FeedbackError::InvalidInput(reason) => reason,
        other => other.to_string(),
    }
}
