//! Marking report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Assessment;
use crate::statistics::{compute_cohort_stats, CohortStats};

/// One marked answer within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedAnswer {
    /// Where the answer came from (file name or "stdin").
    pub source: String,
    /// The assessment the evaluator produced.
    pub assessment: Assessment,
}

/// A complete marking report for one batch of answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The question the answers were marked against.
    pub question_id: String,
    /// The marked answers.
    pub answers: Vec<MarkedAnswer>,
    /// Aggregate statistics over the batch.
    pub cohort: CohortStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl MarkingReport {
    /// Build a report, computing cohort statistics from the answers.
    pub fn new(question_id: &str, answers: Vec<MarkedAnswer>, duration_ms: u64) -> Self {
        let cohort = compute_cohort_stats(&answers);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            question_id: question_id.to_string(),
            answers,
            cohort,
            duration_ms,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: MarkingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
