//! Constants used throughout the PFMS core crate.
//!
//! Scoring weights, thresholds and the literal lookup tables used by the answer scorer live
//! here so the algorithms read as logic over data.

/// Weight of the declared feedback type in the combined sentiment.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 0.4;

/// Weight of the scored answer in the combined sentiment.
pub const DEFAULT_ANSWER_WEIGHT: f64 = 0.6;

/// Added to the answer confidence when a feedback type is combined with it.
pub const DEFAULT_CONFIDENCE_BOOST: f64 = 0.2;

/// Combined sentiment at or above this is positive.
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.6;

/// Combined sentiment at or below this is negative.
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = 0.4;

/// Category sentiment for a declared compliment.
pub const COMPLIMENT_SENTIMENT: f64 = 0.9;
/// Category sentiment for a declared complaint.
pub const COMPLAINT_SENTIMENT: f64 = 0.1;
/// Category sentiment for a declared suggestion.
pub const SUGGESTION_SENTIMENT: f64 = 0.6;
/// Category sentiment when no recognised type was declared.
pub const UNKNOWN_CATEGORY_SENTIMENT: f64 = 0.5;

/// Answer sentiment above this adds a positive-response reasoning line.
pub const POSITIVE_RESPONSE_CUTOFF: f64 = 0.7;
/// Answer sentiment below this adds a negative-response reasoning line.
pub const NEGATIVE_RESPONSE_CUTOFF: f64 = 0.3;

pub const INSUFFICIENT_DATA_REASON: &str = "Insufficient data for detailed analysis";

pub const EMPTY_ANSWER_CONFIDENCE: f64 = 0.1;
pub const PHRASE_CONFIDENCE: f64 = 0.8;
pub const KEYWORD_CONFIDENCE: f64 = 0.6;
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// Longest range accepted by the weekly trend report.
pub const MAX_TREND_WEEKS: i64 = 520;

/// Keywords whose presence in free text counts towards a positive reading.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "perfect",
    "satisfied",
    "happy",
    "pleased",
    "impressed",
    "helpful",
    "caring",
    "professional",
    "clean",
    "efficient",
    "quick",
    "fast",
    "timely",
    "polite",
    "friendly",
    "kind",
    "attentive",
    "thorough",
];

/// Keywords whose presence in free text counts towards a negative reading.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "disappointed",
    "unsatisfied",
    "unhappy",
    "angry",
    "frustrated",
    "upset",
    "poor",
    "slow",
    "dirty",
    "unclean",
    "rude",
    "unprofessional",
    "unhelpful",
    "uncaring",
    "neglected",
    "ignored",
    "long wait",
    "delayed",
    "late",
];

/// Radio/select option labels (lower-cased) and the sentiment they carry.
pub const PHRASE_SENTIMENTS: &[(&str, f64)] = &[
    ("yes", 1.0),
    ("yes, perfectly", 1.0),
    ("yes, very efficiently", 1.0),
    ("excellent", 1.0),
    ("very good", 1.0),
    ("very satisfied", 1.0),
    ("very helpful", 1.0),
    ("very professional", 1.0),
    ("very clean", 1.0),
    ("yes, somewhat", 0.6),
    ("somewhat efficiently", 0.6),
    ("good", 0.6),
    ("satisfied", 0.6),
    ("helpful", 0.6),
    ("professional", 0.6),
    ("clean", 0.6),
    ("somewhat", 0.6),
    ("neutral", 0.5),
    ("okay", 0.5),
    ("average", 0.5),
    ("moderate", 0.5),
    ("no, not at all", 0.4),
    ("not very efficiently", 0.4),
    ("poor", 0.4),
    ("unsatisfied", 0.4),
    ("unhelpful", 0.4),
    ("unprofessional", 0.4),
    ("dirty", 0.4),
    ("not very", 0.4),
    ("no", 0.0),
    ("not at all efficiently", 0.0),
    ("terrible", 0.0),
    ("very poor", 0.0),
    ("very unsatisfied", 0.0),
    ("very unhelpful", 0.0),
    ("very unprofessional", 0.0),
    ("very dirty", 0.0),
];
