//! Feedback analysis service.
//!
//! Binds the pure engine functions to a startup-resolved [`CoreConfig`] so the outer
//! surfaces (CLI, REST) do not need to thread scoring parameters through every call.

use crate::categorizer::{categorize_feedback_with, FeedbackCategory};
use crate::cluster::{cluster_user_feedback_with, UserFeedbackCluster};
use crate::summary::{
    filter_by_department, sentiment_breakdown, summarize_feedback_types, FeedbackTypeSummary,
    SentimentBreakdown,
};
use crate::trends::{weekly_type_counts, WeeklyTypeCount};
use crate::{CoreConfig, FeedbackRecord, FeedbackResult};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::sync::Arc;

/// Pure feedback analysis - no API concerns
#[derive(Clone, Debug)]
pub struct FeedbackService {
    cfg: Arc<CoreConfig>,
}

impl Default for FeedbackService {
    fn default() -> Self {
        Self::new(Arc::new(CoreConfig::default()))
    }
}

impl FeedbackService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn categorize(&self, record: &FeedbackRecord) -> FeedbackCategory {
        categorize_feedback_with(record, self.cfg.scoring())
    }

    /// Clusters feedback by patient, optionally restricted to one department first.
    pub fn clusters(
        &self,
        records: &[FeedbackRecord],
        department_id: Option<i64>,
    ) -> Vec<UserFeedbackCluster> {
        let scoped = scope(records, department_id);
        cluster_user_feedback_with(&scoped, self.cfg.scoring())
    }

    pub fn type_summary(
        &self,
        records: &[FeedbackRecord],
        department_id: Option<i64>,
    ) -> FeedbackTypeSummary {
        summarize_feedback_types(&scope(records, department_id))
    }

    pub fn sentiment_breakdown(
        &self,
        records: &[FeedbackRecord],
        department_id: Option<i64>,
    ) -> SentimentBreakdown {
        sentiment_breakdown(&scope(records, department_id), self.cfg.scoring())
    }

    pub fn weekly_trend(
        &self,
        records: &[FeedbackRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> FeedbackResult<Vec<WeeklyTypeCount>> {
        weekly_type_counts(records, start, end)
    }
}

fn scope(records: &[FeedbackRecord], department_id: Option<i64>) -> Cow<'_, [FeedbackRecord]> {
    match department_id {
        Some(id) => Cow::Owned(filter_by_department(records, id)),
        None => Cow::Borrowed(records),
    }
}
