//! Concurrent parsing of many documents

use crate::error::{ErrorKind, ResumeParserError};
use crate::processing::parser::{ParseResult, ResumeParser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ResumeParserError> for DocumentFailure {
    fn from(err: &ResumeParserError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Parsed(ParseResult),
    Failed(DocumentFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl DocumentOutcome {
    pub fn parsed(&self) -> Option<&ParseResult> {
        match &self.outcome {
            Outcome::Parsed(result) => Some(result),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&DocumentFailure> {
        match &self.outcome {
            Outcome::Parsed(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }
}

/// Parses documents independently; one document failing never affects the
/// others.
pub struct BatchRunner {
    parser: Arc<ResumeParser>,
    max_concurrency: usize,
    show_progress: bool,
}

impl BatchRunner {
    pub fn new(parser: Arc<ResumeParser>, max_concurrency: usize) -> Self {
        Self {
            parser,
            max_concurrency: max_concurrency.max(1),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Outcomes come back sorted by path
    pub async fn run(&self, paths: Vec<PathBuf>) -> Vec<DocumentOutcome> {
        info!(
            "Parsing {} document(s) with up to {} in flight",
            paths.len(),
            self.max_concurrency
        );

        let progress = self.progress_bar(paths.len() as u64);
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut in_flight: HashMap<task::Id, PathBuf> = HashMap::new();

        for path in paths {
            let parser = Arc::clone(&self.parser);
            let permits = Arc::clone(&permits);
            let task_path = path.clone();
            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = permits.acquire_owned().await.ok();
                let outcome = match parser.parse_document(&task_path).await {
                    Ok(result) => Outcome::Parsed(result),
                    Err(e) => {
                        warn!("Skipping {}: {}", task_path.display(), e);
                        Outcome::Failed(DocumentFailure::from(&e))
                    }
                };
                DocumentOutcome {
                    path: task_path,
                    outcome,
                }
            });
            in_flight.insert(handle.id(), path);
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            progress.inc(1);
            match joined {
                Ok((id, outcome)) => {
                    in_flight.remove(&id);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    let Some(path) = in_flight.remove(&e.id()) else {
                        error!("Untracked document task aborted: {}", e);
                        continue;
                    };
                    error!("Document task for {} aborted: {}", path.display(), e);
                    let failure = ResumeParserError::Extraction(e.to_string());
                    outcomes.push(DocumentOutcome {
                        path,
                        outcome: Outcome::Failed(DocumentFailure::from(&failure)),
                    });
                }
            }
        }
        progress.finish_and_clear();

        outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        outcomes
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message("resumes");
        bar
    }
}
