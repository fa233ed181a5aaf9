//! Cohort statistics across a batch of marked answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Assessment, TagStatus};
use crate::report::MarkedAnswer;

/// Aggregate statistics for a batch of answers marked together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    /// Total answers in the batch.
    pub total: usize,
    /// Answers below the word-count gate.
    pub gated: usize,
    /// Answers that received a score.
    pub scored: usize,
    /// Mean score over scored answers (0.0 when none were scored).
    pub mean_score: f64,
    /// Lowest score awarded, if any answer was scored.
    pub min_score: Option<u8>,
    /// Highest score awarded, if any answer was scored.
    pub max_score: Option<u8>,
    /// Count of scored answers per score value.
    pub score_distribution: BTreeMap<u8, usize>,
    /// Per-dimension tag tallies across scored answers.
    pub dimension_tallies: BTreeMap<String, DimensionTally>,
}

/// How many answers landed on each tag status for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionTally {
    pub ok: usize,
    pub mid: usize,
    pub bad: usize,
}

/// Compute aggregate statistics over a batch of marked answers.
// BTreeMap keys keep report JSON stable across runs.
pub fn compute_cohort_stats(answers: &[MarkedAnswer]) -> CohortStats {
    let total = answers.len();
    let gated = answers
        .iter()
        .filter(|a| a.assessment.is_gated())
        .count();
    let scored = total - gated;

    let mut score_sum = 0u64;
    let mut min_score: Option<u8> = None;
    let mut max_score: Option<u8> = None;
    let mut score_distribution: BTreeMap<u8, usize> = BTreeMap::new();
    let mut dimension_tallies: BTreeMap<String, DimensionTally> = BTreeMap::new();

    for answer in answers {
        let Assessment::Scored(s) = &answer.assessment else {
            continue;
        };
        score_sum += u64::from(s.score);
        min_score = Some(min_score.map_or(s.score, |m| m.min(s.score)));
        max_score = Some(max_score.map_or(s.score, |m| m.max(s.score)));
        *score_distribution.entry(s.score).or_default() += 1;

        for tag in &s.tags {
            let tally = dimension_tallies.entry(tag.dimension.clone()).or_default();
            match tag.status {
                TagStatus::Ok => tally.ok += 1,
                TagStatus::Mid => tally.mid += 1,
                TagStatus::Bad => tally.bad += 1,
            }
        }
    }

    let mean_score = if scored == 0 {
        0.0
    } else {
        score_sum as f64 / scored as f64
    };

    CohortStats {
        total,
        gated,
        scored,
        mean_score,
        min_score,
        max_score,
        score_distribution,
        dimension_tallies,
    }
}
