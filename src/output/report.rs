//! Report structures for a parse run

use crate::processing::batch::DocumentOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything one invocation produced, in path order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub metadata: ReportMetadata,
    pub summary: BatchSummary,
    pub documents: Vec<DocumentOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub taxonomy_size: usize,
    pub tool_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub parsed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn new(documents: Vec<DocumentOutcome>, processing_time_ms: u64, taxonomy_size: usize) -> Self {
        let parsed = documents.iter().filter(|d| d.parsed().is_some()).count();
        let summary = BatchSummary {
            total: documents.len(),
            parsed,
            failed: documents.len() - parsed,
        };

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                taxonomy_size,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary,
            documents,
        }
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`
pub fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
