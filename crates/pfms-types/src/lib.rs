//! Validated value types shared across the PFMS crates.
//!
//! These wrap the loosely-typed fields of a feedback payload so that, once constructed,
//! downstream code can rely on their invariants without re-checking them.

use std::fmt;

/// Errors that can occur when creating validated identifier types.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The input identifier was empty or contained only whitespace
    #[error("identifier cannot be empty")]
    Empty,
}

/// An opaque feedback identifier that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackId(String);

impl FeedbackId {
    /// Creates a new `FeedbackId` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(FeedbackId)` if the trimmed input is non-empty,
    /// or `Err(IdError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FeedbackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for FeedbackId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FeedbackId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FeedbackId::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The feedback type a patient declared when submitting feedback.
///
/// Parsing is case-insensitive but otherwise exact: surrounding whitespace is not stripped.
/// Anything outside the three known types is kept verbatim in
/// `Other` and carries no sentiment signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackType {
    Complaint,
    Suggestion,
    Compliment,
    Other(String),
}

impl FeedbackType {
    /// Parses a declared category. Never fails.
    pub fn parse(input: &str) -> Self {
        match input.to_uppercase().as_str() {
            "COMPLAINT" => Self::Complaint,
            "SUGGESTION" => Self::Suggestion,
            "COMPLIMENT" => Self::Compliment,
            _ => Self::Other(input.to_owned()),
        }
    }

    /// Lower-case label used in human-readable reasoning, `None` for unrecognised types.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Complaint => Some("complaint"),
            Self::Suggestion => Some("suggestion"),
            Self::Compliment => Some("compliment"),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Complaint => "COMPLAINT",
            Self::Suggestion => "SUGGESTION",
            Self::Compliment => "COMPLIMENT",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for FeedbackType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for FeedbackType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(FeedbackType::parse(&s))
    }
}

/// Sentiment verdict for a single feedback or a whole patient cluster.
///
/// `Unrecognised` is never produced by categorization. It only appears when a verdict is
/// deserialized from an external payload carrying an unknown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
    Neutral,
    #[serde(other)]
    Unrecognised,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unrecognised => "unrecognised",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score clamped to the closed unit interval `[0, 1]`.
///
/// Values outside the interval are clamped on construction; NaN becomes `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);
    pub const ONE: Score = Score(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl serde::Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Score::new(value))
    }
}
