//! Change report produced by the inspector.

use serde::{Serialize, Serializer};

use crate::constants::{DIFF_SUPPRESSED_HINT, NO_CHANGES_MESSAGE};

/// Structured summary of the changes between a base branch and `HEAD`.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub base_branch: String,
    pub files_changed: Vec<String>,
    pub statistics: String,
    pub commits: Vec<String>,
    /// Full diff, or `None` when the caller asked for it to be left out.
    #[serde(serialize_with = "serialize_diff")]
    pub diff: Option<String>,
    pub truncated_diff: String,
    pub total_diff_lines: usize,
}

fn serialize_diff<S: Serializer>(diff: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(diff.as_deref().unwrap_or(DIFF_SUPPRESSED_HINT))
}

/// Result of one inspection as it crosses the tool boundary.
///
/// Serializes untagged: a full report, `{"message": ...}` when there is
/// nothing to report, or `{"error": ...}` when a git query failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InspectOutcome {
    Report(ChangeReport),
    NoChanges { message: String },
    Error { error: String },
}

impl InspectOutcome {
    pub fn no_changes() -> Self {
        InspectOutcome::NoChanges {
            message: NO_CHANGES_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        InspectOutcome::Error {
            error: message.into(),
        }
    }

    pub fn report(&self) -> Option<&ChangeReport> {
        match self {
            InspectOutcome::Report(report) => Some(report),
            _ => None,
        }
    }
}
