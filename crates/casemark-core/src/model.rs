//! Core data model types for casemark.
//!
//! These are the fundamental types the rest of the system uses to represent
//! the outcome of marking an answer: criterion levels, tags, the diagnostic
//! grid, and the gated/scored assessment union.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How well a scored dimension was satisfied.
///
/// Ordering matters: `Missing < Developing < Secure`, so comparisons like
/// `level >= CriterionLevel::Developing` read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CriterionLevel {
    Missing,
    Developing,
    Secure,
}

impl CriterionLevel {
    /// Numeric tier (Missing=0, Developing=1, Secure=2).
    pub fn value(self) -> u8 {
        match self {
            CriterionLevel::Missing => 0,
            CriterionLevel::Developing => 1,
            CriterionLevel::Secure => 2,
        }
    }
}

impl fmt::Display for CriterionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionLevel::Missing => write!(f, "Missing"),
            CriterionLevel::Developing => write!(f, "Developing"),
            CriterionLevel::Secure => write!(f, "Secure"),
        }
    }
}

/// Three-valued status shown on the dimension tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Ok,
    Mid,
    Bad,
}

impl From<CriterionLevel> for TagStatus {
    fn from(level: CriterionLevel) -> Self {
        match level {
            CriterionLevel::Secure => TagStatus::Ok,
            CriterionLevel::Developing => TagStatus::Mid,
            CriterionLevel::Missing => TagStatus::Bad,
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagStatus::Ok => write!(f, "ok"),
            TagStatus::Mid => write!(f, "mid"),
            TagStatus::Bad => write!(f, "bad"),
        }
    }
}

/// One of the five fixed assessment dimensions with its tag status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionTag {
    /// Display name (e.g. "Ethical awareness").
    pub dimension: String,
    /// Tag status derived from the corresponding criterion level.
    pub status: TagStatus,
}

/// One row of the fixed-shape diagnostic grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    /// Row key (e.g. "ethical", "recs").
    pub dimension: String,
    /// Grid status marker.
    pub status: CriterionLevel,
}

/// A named regulatory or ethical framework with contextual notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkNote {
    /// Framework name (e.g. "UK GDPR & Data Protection Act 2018").
    pub name: String,
    /// What the framework expects in general.
    pub expectation: String,
    /// How the framework applies to this case.
    pub case: String,
}

/// The outcome of marking one answer.
///
/// Modelled as a tagged union rather than a struct with a `gated` flag so
/// the score, grid, frameworks, and model answer are statically unreachable
/// for a gated result. The gate is a disclosure boundary, not a UI choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Assessment {
    /// The answer was too short to mark; only the word count and an
    /// instructional message are disclosed.
    Gated(GatedAssessment),
    /// The answer cleared the gate and received a full assessment.
    Scored(ScoredAssessment),
}

impl Assessment {
    /// Word count of the submitted answer (available in both variants).
    pub fn word_count(&self) -> usize {
        match self {
            Assessment::Gated(g) => g.word_count,
            Assessment::Scored(s) => s.word_count,
        }
    }

    pub fn is_gated(&self) -> bool {
        matches!(self, Assessment::Gated(_))
    }

    /// The aggregate score, if the answer was scored.
    pub fn score(&self) -> Option<u8> {
        match self {
            Assessment::Gated(_) => None,
            Assessment::Scored(s) => Some(s.score),
        }
    }

    pub fn as_scored(&self) -> Option<&ScoredAssessment> {
        match self {
            Assessment::Gated(_) => None,
            Assessment::Scored(s) => Some(s),
        }
    }
}

/// Assessment of an answer below the word-count gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedAssessment {
    /// Word count of the submission.
    pub word_count: usize,
    /// Fixed instructional message asking for a longer answer.
    pub message: String,
}

/// Full assessment of an answer that cleared the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAssessment {
    /// Word count of the submission.
    pub word_count: usize,
    /// Aggregate score, an integer in 0..=10.
    pub score: u8,
    /// Raw improvement notes in criterion evaluation order.
    pub notes: Vec<String>,
    /// Rendered feedback text ("To improve:" plus bullets, or a commendation).
    pub feedback: String,
    /// Up to three canned strength sentences.
    pub strengths: Vec<String>,
    /// The five fixed dimension tags.
    pub tags: Vec<DimensionTag>,
    /// The five fixed diagnostic grid rows.
    pub grid: Vec<GridRow>,
    /// Static framework reference material for the case.
    pub frameworks: Vec<FrameworkNote>,
    /// The fixed model answer text.
    pub model_answer: String,
}
