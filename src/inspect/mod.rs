//! Change inspection: runs git queries and shapes a bounded report.
//!
//! The inspector issues up to four read-only queries against a working
//! directory:
//!
//! 1. `git diff <base>..HEAD`, which short-circuits with a "no changes"
//!    result when empty
//! 2. `git diff --stat <base>..HEAD`
//! 3. `git diff --name-only <base>...HEAD` (three dots: merge-base)
//! 4. `git log --oneline <base>..HEAD`
//!
//! The file list compares against the merge base while the diff, stat and
//! log use the plain two-dot range. Both behaviors are kept as they are.
//!
//! Any failing query turns the whole call into an error outcome.

pub mod truncate;

use std::path::Path;
use std::sync::Arc;

use crate::config::InspectConfig;
use crate::git::{GitError, VcsCommand};
use crate::models::{ChangeReport, InspectOutcome};

pub use truncate::{TruncatedDiff, truncate_diff};

/// Parameters of one inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRequest {
    pub base_branch: String,
    pub include_diff: bool,
    pub max_diff_lines: usize,
}

impl Default for InspectRequest {
    fn default() -> Self {
        Self::from(&InspectConfig::default())
    }
}

impl From<&InspectConfig> for InspectRequest {
    fn from(config: &InspectConfig) -> Self {
        Self {
            base_branch: config.base_branch.clone(),
            include_diff: config.include_diff,
            max_diff_lines: config.max_diff_lines,
        }
    }
}

/// Builds [`ChangeReport`]s from git output.
#[derive(Clone)]
pub struct ChangeInspector {
    vcs: Arc<dyn VcsCommand>,
}

impl ChangeInspector {
    pub fn new(vcs: Arc<dyn VcsCommand>) -> Self {
        Self { vcs }
    }

    /// Inspect `working_dir` against `request.base_branch`.
    ///
    /// Never fails: git errors become [`InspectOutcome::Error`].
    pub async fn inspect(&self, request: &InspectRequest, working_dir: &Path) -> InspectOutcome {
        match self.collect(request, working_dir).await {
            Ok(Some(report)) => InspectOutcome::Report(report),
            Ok(None) => InspectOutcome::no_changes(),
            Err(e) => {
                tracing::debug!("inspection of {} failed: {e}", working_dir.display());
                InspectOutcome::error(e.to_string())
            }
        }
    }

    async fn collect(
        &self,
        request: &InspectRequest,
        working_dir: &Path,
    ) -> Result<Option<ChangeReport>, GitError> {
        let range = format!("{}..HEAD", request.base_branch);
        let merge_base_range = format!("{}...HEAD", request.base_branch);

        let diff = self.vcs.run(working_dir, &["diff", &range]).await?;
        if diff.is_empty() {
            return Ok(None);
        }

        let truncated = truncate_diff(&diff, request.max_diff_lines);
        tracing::debug!(
            lines = truncated.total_lines,
            truncated = truncated.was_truncated,
            "diff against {}",
            request.base_branch
        );

        let stats = self.vcs.run(working_dir, &["diff", "--stat", &range]).await?;
        let names = self
            .vcs
            .run(working_dir, &["diff", "--name-only", &merge_base_range])
            .await?;
        let log = self.vcs.run(working_dir, &["log", "--oneline", &range]).await?;

        let (full_diff, total_diff_lines) = if request.include_diff {
            (Some(diff.trim().to_string()), truncated.total_lines)
        } else {
            (None, 0)
        };

        Ok(Some(ChangeReport {
            base_branch: request.base_branch.clone(),
            files_changed: split_lines(&names),
            statistics: stats.trim().to_string(),
            commits: split_lines(&log),
            diff: full_diff,
            truncated_diff: truncated.text,
            total_diff_lines,
        }))
    }
}

fn split_lines(output: &str) -> Vec<String> {
    output.trim().lines().map(str::to_string).collect()
}
