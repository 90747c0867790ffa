//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. The
//! engine never reads process-wide environment variables while categorizing feedback.

use crate::constants::{
    DEFAULT_ANSWER_WEIGHT, DEFAULT_CATEGORY_WEIGHT, DEFAULT_CONFIDENCE_BOOST,
    DEFAULT_NEGATIVE_THRESHOLD, DEFAULT_POSITIVE_THRESHOLD,
};
use crate::{FeedbackError, FeedbackResult};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights and thresholds used when combining a declared feedback type with a scored answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringConfig {
    category_weight: f64,
    answer_weight: f64,
    confidence_boost: f64,
    positive_threshold: f64,
    negative_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_weight: DEFAULT_CATEGORY_WEIGHT,
            answer_weight: DEFAULT_ANSWER_WEIGHT,
            confidence_boost: DEFAULT_CONFIDENCE_BOOST,
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
            negative_threshold: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    /// Create a new `ScoringConfig`.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::Config` if:
    /// - either weight is outside `[0, 1]` or the weights do not sum to 1,
    /// - the confidence boost is outside `[0, 1]`,
    /// - the thresholds are not ordered `0 <= negative < positive <= 1`.
    pub fn new(
        category_weight: f64,
        answer_weight: f64,
        confidence_boost: f64,
        positive_threshold: f64,
        negative_threshold: f64,
    ) -> FeedbackResult<Self> {
        let unit = |v: f64| (0.0..=1.0).contains(&v);

        if !unit(category_weight) || !unit(answer_weight) {
            return Err(FeedbackError::Config(
                "weights must lie within [0, 1]".into(),
            ));
        }
        if (category_weight + answer_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(FeedbackError::Config(format!(
                "category and answer weights must sum to 1 (got {})",
                category_weight + answer_weight
            )));
        }
        if !unit(confidence_boost) {
            return Err(FeedbackError::Config(
                "confidence boost must lie within [0, 1]".into(),
            ));
        }
        if !unit(positive_threshold)
            || !unit(negative_threshold)
            || negative_threshold >= positive_threshold
        {
            return Err(FeedbackError::Config(
                "thresholds must satisfy 0 <= negative < positive <= 1".into(),
            ));
        }

        Ok(Self {
            category_weight,
            answer_weight,
            confidence_boost,
            positive_threshold,
            negative_threshold,
        })
    }

    pub fn category_weight(&self) -> f64 {
        self.category_weight
    }

    pub fn answer_weight(&self) -> f64 {
        self.answer_weight
    }

    pub fn confidence_boost(&self) -> f64 {
        self.confidence_boost
    }

    pub fn positive_threshold(&self) -> f64 {
        self.positive_threshold
    }

    pub fn negative_threshold(&self) -> f64 {
        self.negative_threshold
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    scoring: ScoringConfig,
}

impl CoreConfig {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}

/// Raw, optional overrides for each scoring parameter, typically read from the environment.
#[derive(Clone, Debug, Default)]
pub struct ScoringOverrides {
    pub category_weight: Option<String>,
    pub answer_weight: Option<String>,
    pub confidence_boost: Option<String>,
    pub positive_threshold: Option<String>,
    pub negative_threshold: Option<String>,
}

/// Build a `ScoringConfig` from optional string values.
///
/// `None` or empty/whitespace values fall back to the defaults.
pub fn scoring_config_from_env_values(
    overrides: ScoringOverrides,
) -> FeedbackResult<ScoringConfig> {
    fn parse(name: &str, value: Option<String>, default: f64) -> FeedbackResult<f64> {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        match value {
            None => Ok(default),
            Some(v) => v
                .parse::<f64>()
                .map_err(|_| FeedbackError::Config(format!("{name} is not a number: {v:?}"))),
        }
    }

    ScoringConfig::new(
        parse(
            "category weight",
            overrides.category_weight,
            DEFAULT_CATEGORY_WEIGHT,
        )?,
        parse("answer weight", overrides.answer_weight, DEFAULT_ANSWER_WEIGHT)?,
        parse(
            "confidence boost",
            overrides.confidence_boost,
            DEFAULT_CONFIDENCE_BOOST,
        )?,
        parse(
            "positive threshold",
            overrides.positive_threshold,
            DEFAULT_POSITIVE_THRESHOLD,
        )?,
        parse(
            "negative threshold",
            overrides.negative_threshold,
            DEFAULT_NEGATIVE_THRESHOLD,
        )?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config_matches_constants() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.category_weight(), 0.4);
        assert_eq!(cfg.answer_weight(), 0.6);
        assert_eq!(cfg.confidence_boost(), 0.2);
        assert_eq!(cfg.positive_threshold(), 0.6);
        assert_eq!(cfg.negative_threshold(), 0.4);
    }

    #[test]
    fn test_scoring_config_rejects_weights_not_summing_to_one() {
        let err = ScoringConfig::new(0.5, 0.6, 0.2, 0.6, 0.4).expect_err("should reject");
        assert!(matches!(err, FeedbackError::Config(msg) if msg.contains("sum to 1")));
    }

    #[test]
    fn test_scoring_config_rejects_inverted_thresholds() {
        let err = ScoringConfig::new(0.4, 0.6, 0.2, 0.4, 0.6).expect_err("should reject");
        assert!(matches!(err, FeedbackError::Config(msg) if msg.contains("thresholds")));
    }

    #[test]
    fn test_scoring_config_rejects_out_of_range_boost() {
        let err = ScoringConfig::new(0.4, 0.6, 1.5, 0.6, 0.4).expect_err("should reject");
        assert!(matches!(err, FeedbackError::Config(msg) if msg.contains("boost")));
    }

    #[test]
    fn test_env_values_blank_fall_back_to_defaults() {
        let cfg = scoring_config_from_env_values(ScoringOverrides {
            category_weight: Some("   ".into()),
            ..Default::default()
        })
        .expect("defaults should validate");
        assert_eq!(cfg, ScoringConfig::default());
    }

    #[test]
    fn test_env_values_override_and_validate() {
        let cfg = scoring_config_from_env_values(ScoringOverrides {
            category_weight: Some("0.5".into()),
            answer_weight: Some(" 0.5 ".into()),
            ..Default::default()
        })
        .expect("should accept");
        assert_eq!(cfg.category_weight(), 0.5);
        assert_eq!(cfg.answer_weight(), 0.5);

        let err = scoring_config_from_env_values(ScoringOverrides {
            positive_threshold: Some("high".into()),
            ..Default::default()
        })
        .expect_err("should reject");
        assert!(matches!(err, FeedbackError::Config(msg) if msg.contains("not a number")));
    }
}
